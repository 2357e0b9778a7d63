//! Declarative game filters.
//!
//! A [`FilterConfig`] holds exclude and include rules. [`compile`] turns it
//! into a single [`GameFilter`] predicate: a game is kept when no exclude rule
//! matches and every include rule matches. Exclusion always wins.

use std::str::FromStr;

use crate::comparer::eq_ignore_case;
use crate::error::MergeError;
use crate::model::{Game, has_value};

/// The literal markers the BIOS exclusion looks for in game names.
pub const BIOS_MARKERS: [&str; 2] = ["[BIOS]", "(BIOS)"];

/// Game property a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterProperty {
    Name,
    Path,
    Region,
    Lang,
    Genre,
    Id,
    Source,
    Developer,
    Publisher,
    Image,
    Description,
    Rating,
    Hash,
    Crc32,
}

const ALL_PROPERTIES: &[FilterProperty] = &[
    FilterProperty::Name,
    FilterProperty::Path,
    FilterProperty::Region,
    FilterProperty::Lang,
    FilterProperty::Genre,
    FilterProperty::Id,
    FilterProperty::Source,
    FilterProperty::Developer,
    FilterProperty::Publisher,
    FilterProperty::Image,
    FilterProperty::Description,
    FilterProperty::Rating,
    FilterProperty::Hash,
    FilterProperty::Crc32,
];

impl FilterProperty {
    pub fn all() -> &'static [FilterProperty] {
        ALL_PROPERTIES
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Path => "path",
            Self::Region => "region",
            Self::Lang => "lang",
            Self::Genre => "genre",
            Self::Id => "id",
            Self::Source => "source",
            Self::Developer => "developer",
            Self::Publisher => "publisher",
            Self::Image => "image",
            Self::Description => "description",
            Self::Rating => "rating",
            Self::Hash => "hash",
            Self::Crc32 => "crc32",
        }
    }

    /// Alternative spellings accepted by [`FromStr`], matching the XML tag
    /// names where they differ.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Lang => &["language"],
            Self::Description => &["desc"],
            Self::Crc32 => &["crc"],
            _ => &[],
        }
    }

    pub fn value<'a>(&self, game: &'a Game) -> Option<&'a str> {
        match self {
            Self::Name => game.name.as_deref(),
            Self::Path => game.path.as_deref(),
            Self::Region => game.region.as_deref(),
            Self::Lang => game.lang.as_deref(),
            Self::Genre => game.genre.as_deref(),
            Self::Id => game.id.as_deref(),
            Self::Source => game.source.as_deref(),
            Self::Developer => game.developer.as_deref(),
            Self::Publisher => game.publisher.as_deref(),
            Self::Image => game.image.as_deref(),
            Self::Description => game.description.as_deref(),
            Self::Rating => game.rating.as_deref(),
            Self::Hash => game.hash.as_deref(),
            Self::Crc32 => game.crc32.as_deref(),
        }
    }
}

impl std::fmt::Display for FilterProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for FilterProperty {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_PROPERTIES
            .iter()
            .copied()
            .find(|p| p.short_name() == lower || p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| MergeError::unknown_property(s))
    }
}

/// How a rule's values are tested against the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperation {
    StartsWith,
    EndsWith,
    Contains,
    Equals,
    /// Same test as `Equals`; reads better for lists ("region in jp,eu").
    In,
    /// Property is present and non-empty; the rule's values are ignored.
    HasValue,
}

impl FilterOperation {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::In => "in",
            Self::HasValue => "hasvalue",
        }
    }
}

impl std::fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for FilterOperation {
    type Err = MergeError;

    /// Case-insensitive; `-` and `_` separators are ignored so
    /// `starts-with`, `starts_with` and `StartsWith` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "startswith" => Ok(Self::StartsWith),
            "endswith" => Ok(Self::EndsWith),
            "contains" => Ok(Self::Contains),
            "equals" | "eq" => Ok(Self::Equals),
            "in" => Ok(Self::In),
            "hasvalue" => Ok(Self::HasValue),
            _ => Err(MergeError::unknown_operation(s)),
        }
    }
}

/// One filter rule: `property` tested with `operation` against `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub property: FilterProperty,
    pub operation: FilterOperation,
    pub values: Vec<String>,
}

impl FilterRule {
    pub fn new<I, S>(property: FilterProperty, operation: FilterOperation, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property,
            operation,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a rule written as `PROPERTY:OPERATION[:VALUE,VALUE,...]`,
    /// e.g. `name:contains:Demo,Beta` or `developer:hasvalue`.
    ///
    /// Unknown properties or operations are rejected.
    pub fn parse(text: &str) -> Result<Self, MergeError> {
        let mut parts = text.splitn(3, ':');
        let property = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| MergeError::invalid_rule(text))?;
        let operation = parts.next().ok_or_else(|| MergeError::invalid_rule(text))?;

        let property: FilterProperty = property.parse()?;
        let operation: FilterOperation = operation.parse()?;
        let values = parts.next().map(split_comma_list).unwrap_or_default();

        if values.is_empty() && operation != FilterOperation::HasValue {
            return Err(MergeError::invalid_rule(text));
        }

        Ok(Self {
            property,
            operation,
            values,
        })
    }

    fn matches(&self, game: &Game) -> bool {
        let value = self.property.value(game);
        match self.operation {
            FilterOperation::StartsWith => value.is_some_and(|v| {
                let v = v.to_lowercase();
                self.values.iter().any(|c| v.starts_with(&c.to_lowercase()))
            }),
            FilterOperation::EndsWith => value.is_some_and(|v| {
                let v = v.to_lowercase();
                self.values.iter().any(|c| v.ends_with(&c.to_lowercase()))
            }),
            FilterOperation::Contains => value.is_some_and(|v| {
                let v = v.to_lowercase();
                self.values.iter().any(|c| v.contains(&c.to_lowercase()))
            }),
            FilterOperation::Equals | FilterOperation::In => {
                value.is_some_and(|v| self.values.iter().any(|c| eq_ignore_case(v, c)))
            }
            FilterOperation::HasValue => has_value(value),
        }
    }
}

impl FromStr for FilterRule {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FilterRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.property, self.operation)?;
        if !self.values.is_empty() {
            write!(f, ":{}", self.values.join(","))?;
        }
        Ok(())
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Exclude and include rules, each in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub exclude_rules: Vec<FilterRule>,
    pub include_rules: Vec<FilterRule>,
}

impl FilterConfig {
    pub fn new(exclude_rules: Vec<FilterRule>, include_rules: Vec<FilterRule>) -> Self {
        Self {
            exclude_rules,
            include_rules,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exclude_rules.is_empty() && self.include_rules.is_empty()
    }

    pub fn exclude(mut self, rule: FilterRule) -> Self {
        self.exclude_rules.push(rule);
        self
    }

    pub fn include(mut self, rule: FilterRule) -> Self {
        self.include_rules.push(rule);
        self
    }
}

/// Build a [`FilterConfig`] from the command-line filter switches.
///
/// Empty lists add no rule. Values may themselves be comma-separated.
pub fn filter_config_from_flags(
    exclude_bios: bool,
    exclude_name_contains: &[String],
    exclude_regions: &[String],
    include_languages: &[String],
) -> FilterConfig {
    let flatten = |values: &[String]| -> Vec<String> {
        values.iter().flat_map(|v| split_comma_list(v)).collect()
    };

    let mut config = FilterConfig::default();

    if exclude_bios {
        config = config.exclude(FilterRule::new(
            FilterProperty::Name,
            FilterOperation::Contains,
            BIOS_MARKERS,
        ));
    }

    let names = flatten(exclude_name_contains);
    if !names.is_empty() {
        config = config.exclude(FilterRule::new(
            FilterProperty::Name,
            FilterOperation::Contains,
            names,
        ));
    }

    let regions = flatten(exclude_regions);
    if !regions.is_empty() {
        config = config.exclude(FilterRule::new(
            FilterProperty::Region,
            FilterOperation::In,
            regions,
        ));
    }

    let languages = flatten(include_languages);
    if !languages.is_empty() {
        config = config.include(FilterRule::new(
            FilterProperty::Lang,
            FilterOperation::In,
            languages,
        ));
    }

    config
}

/// A compiled game predicate.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    exclude: Vec<FilterRule>,
    include: Vec<FilterRule>,
}

impl GameFilter {
    /// A filter that keeps every game.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Whether the game should be kept.
    pub fn matches(&self, game: &Game) -> bool {
        if self.exclude.iter().any(|rule| rule.matches(game)) {
            return false;
        }
        self.include.iter().all(|rule| rule.matches(game))
    }
}

/// Compile a filter configuration into a single predicate.
pub fn compile(config: &FilterConfig) -> GameFilter {
    log::debug!(
        "Compiling filter: {} exclude rule(s), {} include rule(s)",
        config.exclude_rules.len(),
        config.include_rules.len()
    );
    GameFilter {
        exclude: config.exclude_rules.clone(),
        include: config.include_rules.clone(),
    }
}

/// Which games each side lost to the filter, and how many survived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStatistics {
    pub master_filtered_games: Vec<Game>,
    pub secondary_filtered_games: Vec<Game>,
    pub master_included_count: usize,
    pub secondary_included_count: usize,
    pub merged_game_count: usize,
}

impl FilterStatistics {
    pub fn total_filtered_count(&self) -> usize {
        self.master_filtered_games.len() + self.secondary_filtered_games.len()
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
