// ─── Launch Arguments ───
// Structured view over the raw launch tokens: `--key value` pairs plus
// unrecognized extra tokens.

/// Parsed launch arguments.
///
/// - `--key value` becomes a pair (a repeated key overwrites the earlier
///   value in place, keeping its original position).
/// - `--key` followed by another `--flag` gets an empty value.
/// - A trailing `--key` with nothing after it, and every token that does
///   not start with `--`, is kept as an extra token.
///
/// Flattening (`to_vec`) yields all pairs first, then the extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<(String, String)>,
    extra_args: Vec<String>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw token array.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Self {
        let mut parsed = Self::new();
        let mut i = 0;

        while i < raw.len() {
            let arg = raw[i].as_ref();

            match arg.strip_prefix("--") {
                Some(key) if i + 1 < raw.len() => {
                    let next = raw[i + 1].as_ref();
                    if next.starts_with("--") {
                        parsed.put(key, "");
                    } else {
                        parsed.put(key, next);
                        i += 1;
                    }
                }
                _ => parsed.extra_args.push(arg.to_string()),
            }

            i += 1;
        }

        parsed
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| k == key)
    }

    /// Insert or overwrite a pair.
    pub fn put(&mut self, key: &str, value: &str) {
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.values.push((key.to_string(), value.to_string())),
        }
    }

    /// Remove a pair, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.values.iter().position(|(k, _)| k == key)?;
        Some(self.values.remove(idx).1)
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// Flatten back into launch tokens.
    pub fn to_vec(&self) -> Vec<String> {
        let mut flat = Vec::with_capacity(self.values.len() * 2 + self.extra_args.len());
        for (key, value) in &self.values {
            flat.push(format!("--{}", key));
            flat.push(value.clone());
        }
        flat.extend(self.extra_args.iter().cloned());
        flat
    }
}
