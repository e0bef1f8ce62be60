pub(crate) mod fit;
pub(crate) mod font;
pub(crate) mod provider;
pub(crate) mod shaper;
