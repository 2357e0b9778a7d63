use std::path::Path;

use gamelist_merger_core::{Folder, Game, GameList, Provider};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XmlError;
use crate::schema::{
    FOLDER, GAME, PROVIDER, ROOT, folder_field_mut, game_field_mut, provider_field_mut_lenient,
};

/// The record currently being filled while its element is open.
enum Entry {
    Game(Game),
    Folder(Folder),
    Provider(Provider),
}

impl Entry {
    /// Start a record for a direct child of the root. Unknown elements yield `None`.
    fn open(start: &BytesStart) -> Result<Option<Self>, XmlError> {
        let entry = match element_name(start).as_str() {
            GAME => {
                let (id, source) = id_and_source(start)?;
                Entry::Game(Game {
                    id,
                    source,
                    ..Game::default()
                })
            }
            FOLDER => {
                let (id, source) = id_and_source(start)?;
                Entry::Folder(Folder {
                    id,
                    source,
                    ..Folder::default()
                })
            }
            PROVIDER => Entry::Provider(Provider::default()),
            _ => return Ok(None),
        };
        Ok(Some(entry))
    }

    fn set(&mut self, tag: &str, value: String) {
        let slot = match self {
            Entry::Game(game) => game_field_mut(game, tag),
            Entry::Folder(folder) => folder_field_mut(folder, tag),
            Entry::Provider(provider) => provider_field_mut_lenient(provider, tag),
        };
        if let Some(slot) = slot {
            *slot = Some(value);
        }
    }

    fn finish(self, list: &mut GameList) {
        match self {
            Entry::Game(game) => list.games.push(game),
            Entry::Folder(folder) => list.folders.push(folder),
            Entry::Provider(provider) => list.provider = Some(provider),
        }
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).to_string()
}

fn id_and_source(start: &BytesStart) -> Result<(Option<String>, Option<String>), XmlError> {
    let mut id = None;
    let mut source = None;
    for attr in start.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"id" => id = Some(attr.unescape_value()?.to_string()),
            b"source" => source = Some(attr.unescape_value()?.to_string()),
            _ => {}
        }
    }
    Ok((id, source))
}

/// Parse gamelist XML into a [`GameList`].
///
/// Elements the format does not define are skipped. Field values are trimmed
/// and an empty field element is kept as an empty string.
pub fn parse_gamelist(xml: &str) -> Result<GameList, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut list = GameList::default();
    let mut saw_root = false;
    let mut depth = 0usize;
    let mut entry: Option<Entry> = None;
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                depth += 1;
                match depth {
                    1 => {
                        check_root(e, saw_root)?;
                        saw_root = true;
                    }
                    2 => entry = Entry::open(e)?,
                    3 if entry.is_some() => {
                        field = Some(element_name(e));
                        text.clear();
                    }
                    _ => {}
                }
            }
            Event::Empty(ref e) => match depth + 1 {
                1 => {
                    check_root(e, saw_root)?;
                    saw_root = true;
                }
                2 => {
                    if let Some(empty) = Entry::open(e)? {
                        empty.finish(&mut list);
                    }
                }
                3 => {
                    if let Some(ref mut current) = entry {
                        current.set(&element_name(e), String::new());
                    }
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if depth == 3 && field.is_some() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if depth == 3 && field.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                match depth {
                    2 => {
                        if let Some(done) = entry.take() {
                            done.finish(&mut list);
                        }
                    }
                    3 => {
                        if let (Some(current), Some(tag)) = (entry.as_mut(), field.take()) {
                            current.set(&tag, text.trim().to_string());
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(XmlError::invalid_gamelist("XML document has no root element"));
    }

    log::debug!(
        "Parsed gamelist: {} games, {} folders, provider {}",
        list.total_games(),
        list.total_folders(),
        if list.provider.is_some() { "present" } else { "absent" }
    );
    Ok(list)
}

fn check_root(start: &BytesStart, saw_root: bool) -> Result<(), XmlError> {
    let name = element_name(start);
    if saw_root {
        return Err(XmlError::invalid_gamelist(format!(
            "Unexpected second root element <{name}>"
        )));
    }
    if name != ROOT {
        return Err(XmlError::invalid_gamelist(format!(
            "Root element must be <{ROOT}>, found <{name}>"
        )));
    }
    Ok(())
}

/// Parse a gamelist from a file path.
pub fn parse_gamelist_file(path: &Path) -> Result<GameList, XmlError> {
    let xml = std::fs::read_to_string(path)?;
    parse_gamelist(&xml)
}

#[cfg(test)]
#[path = "tests/parse_tests.rs"]
mod tests;
