use std::collections::HashMap;

/// Normalize a header for matching: trim, drop BOM, collapse inner whitespace, uppercase.
pub fn header_key(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut key = String::with_capacity(trimmed.len());
    for (idx, part) in trimmed.split_whitespace().enumerate() {
        if idx > 0 {
            key.push(' ');
        }
        key.push_str(&part.to_ascii_uppercase());
    }
    key
}

/// Case- and whitespace-insensitive header index.
#[derive(Debug, Clone)]
pub struct HeaderLookup {
    map: HashMap<String, usize>,
}

impl HeaderLookup {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (idx, header) in headers.into_iter().enumerate() {
            map.entry(header_key(header.as_ref())).or_insert(idx);
        }
        Self { map }
    }

    /// Position of the first header matching `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.map.get(&header_key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&header_key(name))
    }
}
