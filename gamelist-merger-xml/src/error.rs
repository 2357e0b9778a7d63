/// Errors that can occur while reading or writing gamelist files.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Invalid gamelist: {0}")]
    InvalidGamelist(String),
}

impl XmlError {
    pub fn invalid_gamelist(msg: impl Into<String>) -> Self {
        Self::InvalidGamelist(msg.into())
    }
}
