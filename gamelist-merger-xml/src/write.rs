use std::fs;
use std::path::Path;

use gamelist_merger_core::{GameList, Provider};

use crate::error::XmlError;
use crate::schema::{
    FOLDER, FOLDER_ELEMENTS, GAME, GAME_ELEMENTS, PATH, PROVIDER, PROVIDER_ELEMENTS, ROOT,
    folder_field, game_field, provider_field,
};

/// Serialize a gamelist to XML text.
///
/// Entries are written in list order: provider, then folders, then games.
/// `<path>` is always written; other fields only when present.
pub fn write_gamelist(list: &GameList) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\"?>\n");
    xml.push('<');
    xml.push_str(ROOT);
    xml.push_str(">\n");

    if let Some(ref provider) = list.provider {
        write_provider(&mut xml, provider);
    }
    for folder in &list.folders {
        write_entry(&mut xml, FOLDER, folder.id.as_deref(), folder.source.as_deref(), |xml| {
            write_fields(xml, FOLDER_ELEMENTS, |tag| folder_field(folder, tag));
        });
    }
    for game in &list.games {
        write_entry(&mut xml, GAME, game.id.as_deref(), game.source.as_deref(), |xml| {
            write_fields(xml, GAME_ELEMENTS, |tag| game_field(game, tag));
        });
    }

    xml.push_str("</");
    xml.push_str(ROOT);
    xml.push_str(">\n");
    xml
}

/// Serialize a gamelist and write it to `path`, replacing any existing file.
pub fn write_gamelist_file(list: &GameList, path: &Path) -> Result<(), XmlError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, write_gamelist(list))?;
    log::debug!(
        "Wrote {} games and {} folders to {}",
        list.total_games(),
        list.total_folders(),
        path.display()
    );
    Ok(())
}

fn write_provider(xml: &mut String, provider: &Provider) {
    xml.push_str("  <");
    xml.push_str(PROVIDER);
    xml.push_str(">\n");
    for &tag in PROVIDER_ELEMENTS {
        if let Some(Some(value)) = provider_field(provider, tag) {
            write_tag(xml, tag, value);
        }
    }
    xml.push_str("  </");
    xml.push_str(PROVIDER);
    xml.push_str(">\n");
}

fn write_entry(
    xml: &mut String,
    element: &str,
    id: Option<&str>,
    source: Option<&str>,
    body: impl FnOnce(&mut String),
) {
    xml.push_str("  <");
    xml.push_str(element);
    write_attribute(xml, "id", id);
    write_attribute(xml, "source", source);
    xml.push_str(">\n");
    body(xml);
    xml.push_str("  </");
    xml.push_str(element);
    xml.push_str(">\n");
}

fn write_fields<'a>(
    xml: &mut String,
    elements: &[&str],
    field: impl Fn(&str) -> Option<&'a Option<String>>,
) {
    for &tag in elements {
        match field(tag) {
            Some(Some(value)) => write_tag(xml, tag, value),
            _ if tag == PATH => write_tag(xml, tag, ""),
            _ => {}
        }
    }
}

fn write_attribute(xml: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        xml.push(' ');
        xml.push_str(name);
        xml.push_str("=\"");
        xml.push_str(&escape_xml(value));
        xml.push('"');
    }
}

fn write_tag(xml: &mut String, tag: &str, value: &str) {
    xml.push_str("    <");
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[path = "tests/write_tests.rs"]
mod tests;
