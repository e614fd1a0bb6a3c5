//! System font lookup for sheet text.
//!
//! Faces are resolved once per request and leaked for the life of the
//! process. When the system has no usable face, lookups return `None` and
//! callers skip text.

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight, ID};
use rusttype::Font;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Technical lettering family tried first
pub const DEFAULT_FAMILY: &str = "Sans";

type SheetFont = &'static Font<'static>;

fn system_faces() -> &'static Database {
    static FACES: OnceLock<Database> = OnceLock::new();
    FACES.get_or_init(|| {
        let mut faces = Database::new();
        faces.load_system_fonts();
        tracing::debug!(faces = faces.len(), "system fonts loaded");
        faces
    })
}

/// Font for `family`, falling back to the generic sans face and then to
/// whatever face is installed.
pub fn get_font_for(family: &str, bold: bool) -> Option<SheetFont> {
    static RESOLVED: OnceLock<Mutex<HashMap<(String, bool), Option<SheetFont>>>> =
        OnceLock::new();
    let resolved = RESOLVED.get_or_init(Default::default);
    let key = (family.trim().to_owned(), bold);

    let mut table = resolved.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(hit) = table.get(&key) {
        return *hit;
    }

    let font = query_face(&key.0, bold)
        .or_else(|| system_faces().faces().find_map(|f| open_face(f.id)))
        .map(|f| &*Box::leak(Box::new(f)));
    if font.is_none() {
        tracing::debug!(family, "no usable system font");
    }
    table.insert(key, font);
    font
}

/// Default sheet font.
pub fn get_font() -> Option<SheetFont> {
    get_font_for(DEFAULT_FAMILY, false)
}

fn query_face(family: &str, bold: bool) -> Option<Font<'static>> {
    let generic = match family {
        "" | "Sans" => Family::SansSerif,
        "Serif" => Family::Serif,
        "Monospace" => Family::Monospace,
        named => {
            let families = [Family::Name(named), Family::SansSerif];
            return open_face(system_faces().query(&query(&families, bold))?);
        }
    };
    open_face(system_faces().query(&query(&[generic], bold))?)
}

fn query<'a>(families: &'a [Family<'a>], bold: bool) -> Query<'a> {
    Query {
        families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    }
}

fn open_face(id: ID) -> Option<Font<'static>> {
    let face = system_faces().face(id)?;
    let bytes = match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => std::fs::read(path).ok()?,
        Source::Binary(data) => data.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec_and_index(bytes, face.index)
}
