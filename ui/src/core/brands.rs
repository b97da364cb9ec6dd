//! Perfume brand catalog and title highlighting.
//!
//! The catalog is configuration, handed to views through context; see
//! [`crate::core::config::DashboardConfig::brand_catalog`].

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrandCatalog {
    /// Catalog order, deduplicated.
    names: Vec<String>,
    /// Indices into `names`, longest name first, so "The House of Oud" wins
    /// over "House of Oud" at the same position.
    by_length: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSegment {
    Plain(String),
    /// `text` is the title's own spelling; `brand` the catalog entry it matched.
    Brand { text: String, brand: String },
}

impl TitleSegment {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Brand { text, .. } => text,
        }
    }
}

impl BrandCatalog {
    pub fn new<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        for brand in brands {
            let brand = brand.as_ref().trim();
            if brand.is_empty() {
                continue;
            }
            let lower = brand.to_lowercase();
            if names.iter().any(|known| known.to_lowercase() == lower) {
                continue;
            }
            names.push(brand.to_string());
        }

        let mut by_length: Vec<usize> = (0..names.len()).collect();
        by_length.sort_by(|&a, &b| {
            names[b]
                .chars()
                .count()
                .cmp(&names[a].chars().count())
                .then(a.cmp(&b))
        });

        Self { names, by_length }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Brands mentioned in `title`, in order of first appearance.
    pub fn mentioned_in(&self, title: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for segment in self.highlight(title) {
            if let TitleSegment::Brand { brand, .. } = segment {
                if !found.contains(&brand) {
                    found.push(brand);
                }
            }
        }
        found
    }

    /// Split `title` into plain and brand segments. Matching is
    /// case-insensitive and only on word boundaries; concatenating the
    /// segments' text gives back `title`.
    pub fn highlight(&self, title: &str) -> Vec<TitleSegment> {
        let mut segments = Vec::new();
        let mut plain_start = 0;
        let mut pos = 0;
        let mut prev: Option<char> = None;

        while pos < title.len() {
            let rest = &title[pos..];
            let at_boundary = prev.map_or(true, |c| !c.is_alphanumeric());

            let hit = if at_boundary {
                self.by_length.iter().find_map(|&idx| {
                    let brand = &self.names[idx];
                    let len = match_prefix_ignore_case(rest, brand)?;
                    let ends_on_boundary = rest[len..]
                        .chars()
                        .next()
                        .map_or(true, |c| !c.is_alphanumeric());
                    ends_on_boundary.then_some((idx, len))
                })
            } else {
                None
            };

            match hit {
                Some((idx, len)) => {
                    if plain_start < pos {
                        segments.push(TitleSegment::Plain(title[plain_start..pos].to_string()));
                    }
                    let text = &title[pos..pos + len];
                    segments.push(TitleSegment::Brand {
                        text: text.to_string(),
                        brand: self.names[idx].clone(),
                    });
                    prev = text.chars().last();
                    pos += len;
                    plain_start = pos;
                }
                None => {
                    // `rest` is non-empty, so there is always a next char.
                    let ch = rest.chars().next().unwrap_or_default();
                    prev = Some(ch);
                    pos += ch.len_utf8().max(1);
                }
            }
        }

        if plain_start < title.len() {
            segments.push(TitleSegment::Plain(title[plain_start..].to_string()));
        }
        segments
    }
}

/// Byte length of the prefix of `haystack` that equals `needle` ignoring
/// case, if any.
fn match_prefix_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut hay = haystack.chars();
    for n in needle.chars() {
        let h = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
        consumed += h.len_utf8();
    }
    Some(consumed)
}
