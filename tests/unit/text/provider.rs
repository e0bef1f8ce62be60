use super::*;

#[derive(Debug)]
struct Unavailable;

impl FontProvider for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn resolve(&self, _size_px: u32) -> Option<Font> {
        None
    }
}

#[test]
fn builtin_only_resolver_reports_requested_size() {
    let r = FontResolver::builtin_only();
    for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
        let f = r.resolve(37, bold, italic);
        assert!(f.is_builtin());
        assert_eq!(f.size_px(), 37);
    }
}

#[test]
fn chain_falls_through_unavailable_providers() {
    let r = FontResolver::from_chains(|_| {
        vec![
            Box::new(Unavailable) as Box<dyn FontProvider>,
            Box::new(BuiltinProvider),
        ]
    });
    let f = r.resolve(24, true, false);
    assert!(f.is_builtin());
    assert_eq!(f.size_px(), 24);
    assert_eq!(
        r.provider_names(FontVariant::Bold),
        vec!["unavailable", "builtin"]
    );
}

#[test]
fn exhausted_chain_returns_native_builtin() {
    let r = FontResolver::from_chains(|_| vec![Box::new(Unavailable) as Box<dyn FontProvider>]);
    let f = r.resolve(64, false, false);
    assert!(f.is_builtin());
    assert_eq!(f.size_px(), BuiltinFont::NATIVE_SIZE_PX);
}

#[test]
fn zero_size_yields_native_builtin() {
    let f = FontResolver::builtin_only().resolve(0, false, false);
    assert_eq!(f.size_px(), BuiltinFont::NATIVE_SIZE_PX);
}

#[test]
fn file_provider_ignores_missing_and_corrupt_files() {
    let dir = std::env::temp_dir().join(format!("thumbforge-fonts-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("ARIAL.TTF"), b"not a font").unwrap();

    let corrupt = FileFaceProvider::load(std::slice::from_ref(&dir), FontVariant::Regular);
    assert_eq!(corrupt.name(), "file:arial.ttf");
    assert!(corrupt.resolve(48).is_none());

    let missing = FileFaceProvider::load(std::slice::from_ref(&dir), FontVariant::Bold);
    assert!(missing.resolve(48).is_none());

    let nowhere = FileFaceProvider::load(&[dir.join("does-not-exist")], FontVariant::Italic);
    assert!(nowhere.resolve(48).is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn resolver_without_fonts_or_system_db_still_resolves() {
    let opts = FontOpts {
        font_dirs: vec![],
        system_fonts: false,
    };
    let r = FontResolver::new(&opts);
    assert_eq!(
        r.provider_names(FontVariant::Italic),
        vec!["file:ariali.ttf", "builtin"]
    );
    let f = r.resolve(20, false, true);
    assert!(f.is_builtin());
    assert_eq!(f.size_px(), 20);
}

fn fixture_db() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    for file in ["DejaVuSans.ttf", "DejaVuSans-Bold.ttf"] {
        db.load_font_file(format!("tests/data/fonts/{file}")).unwrap();
    }
    db
}

#[test]
fn system_provider_picks_an_installed_sans_family() {
    let db = fixture_db();

    let regular = SystemFaceProvider::load(&db, FontVariant::Regular);
    let Some(Font::Outline { face, size_px }) = regular.resolve(48) else {
        panic!("installed sans face must resolve");
    };
    assert_eq!(size_px, 48);
    assert_eq!(face.label(), "system:DejaVuSans");

    let bold = SystemFaceProvider::load(&db, FontVariant::Bold);
    let Some(Font::Outline { face, .. }) = bold.resolve(48) else {
        panic!("installed bold face must resolve");
    };
    assert_eq!(face.label(), "system:DejaVuSans-Bold");
}

#[test]
fn system_provider_is_empty_without_faces() {
    let db = fontdb::Database::new();
    let p = SystemFaceProvider::load(&db, FontVariant::Italic);
    assert!(p.resolve(48).is_none());
    assert_eq!(p.name(), "system:Italic");
}
