use serde::Serialize;

use crate::assets::color::parse_color;
use crate::foundation::core::Rgb8;

/// A read-only gallery entry describing a starting look for a thumbnail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub id: u32,
    pub name: &'static str,
    /// CSS `linear-gradient(...)` description, served verbatim to the browser.
    pub background: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub title_color: &'static str,
    pub subtitle_color: &'static str,
}

impl TemplateDescriptor {
    /// Color stops of the gradient, in order.
    pub fn gradient_stops(&self) -> Vec<Rgb8> {
        let Some(args) = self
            .background
            .split_once('(')
            .and_then(|(_, rest)| rest.rsplit_once(')'))
            .map(|(args, _)| args)
        else {
            return Vec::new();
        };
        args.split(',')
            .filter_map(|part| parse_color(part.trim()).ok())
            .collect()
    }
}

const TEMPLATES: [TemplateDescriptor; 5] = [
    TemplateDescriptor {
        id: 1,
        name: "Red Gradient",
        background: "linear-gradient(135deg, #FF0000, #990000)",
        title: "YOUR TITLE HERE",
        subtitle: "Your subtitle text",
        title_color: "#FFFFFF",
        subtitle_color: "#FFFFFF",
    },
    TemplateDescriptor {
        id: 2,
        name: "Dark Professional",
        background: "linear-gradient(135deg, #000000, #333333)",
        title: "YOUR TITLE HERE",
        subtitle: "Your subtitle text",
        title_color: "#FFFFFF",
        subtitle_color: "#CCCCCC",
    },
    TemplateDescriptor {
        id: 3,
        name: "Bright Yellow",
        background: "linear-gradient(135deg, #FFCC00, #FF9900)",
        title: "YOUR TITLE HERE",
        subtitle: "Your subtitle text",
        title_color: "#000000",
        subtitle_color: "#333333",
    },
    TemplateDescriptor {
        id: 4,
        name: "Blue Ocean",
        background: "linear-gradient(135deg, #0077b6, #00b4d8)",
        title: "YOUR TITLE HERE",
        subtitle: "Your subtitle text",
        title_color: "#FFFFFF",
        subtitle_color: "#EEEEEE",
    },
    TemplateDescriptor {
        id: 5,
        name: "Green Nature",
        background: "linear-gradient(135deg, #2a9d8f, #e9c46a)",
        title: "YOUR TITLE HERE",
        subtitle: "Your subtitle text",
        title_color: "#FFFFFF",
        subtitle_color: "#EEEEEE",
    },
];

/// The static template gallery.
pub fn template_catalog() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

pub fn template_by_id(id: u32) -> Option<&'static TemplateDescriptor> {
    TEMPLATES.iter().find(|t| t.id == id)
}
