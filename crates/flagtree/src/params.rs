//! Positional parameters.

use indexmap::IndexMap;

/// Declared positional names, their bound values, and any overflow.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    names: Vec<String>,
    values: IndexMap<String, String>,
    unparsed: Vec<String>,
}

impl ParamSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params = Self::default();
        params.define(names);
        params
    }

    /// Replace the declared names. Previously bound values are discarded.
    pub fn define<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self.values.clear();
        self.unparsed.clear();
    }

    /// Bind `tokens` to the declared names in order. Names without a token stay
    /// unbound; tokens without a name are kept as unparsed arguments.
    pub fn bind(&mut self, tokens: &[String]) {
        self.values.clear();
        self.unparsed.clear();
        let mut tokens = tokens.iter();
        for name in &self.names {
            let Some(token) = tokens.next() else {
                break;
            };
            self.values.insert(name.clone(), token.clone());
        }
        self.unparsed.extend(tokens.cloned());
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Bound values in declaration order.
    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Tokens beyond the declared parameter count.
    pub fn unparsed(&self) -> &[String] {
        &self.unparsed
    }
}
