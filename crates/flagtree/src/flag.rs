//! Flag registry and token scanner.
//!
//! A [`FlagSet`] belongs to one command. It owns the declared flags and their
//! single-character aliases, and [`FlagSet::parse`] consumes the leading flag
//! tokens of an argument list:
//!
//! - `--name=value` / `--name` (presence means true for boolean flags)
//! - `-a`, `-abc` (clusters of boolean aliases)
//! - `-abc=value` (the value goes to the last alias only)
//! - `--` ends flag scanning, as does the first token not starting with `-`

use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::{ConfigError, ParseError};
use crate::value::{Bool, Number, Span, Text, Value};

pub(crate) const HELP_FLAG: &str = "help";
pub(crate) const VERSION_FLAG: &str = "version";

/// A named, typed, optionally aliased flag.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    usage: String,
    default: String,
    initial: Box<dyn Value>,
    value: Box<dyn Value>,
}

impl Flag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Rendered value captured when the flag was defined.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn value(&self) -> &dyn Value {
        self.value.as_ref()
    }

    pub fn is_bool_flag(&self) -> bool {
        self.value.is_bool_flag()
    }
}

/// How a flag token names its flags.
#[derive(Debug, PartialEq, Eq)]
enum FlagToken<'t> {
    Long { name: &'t str, value: Option<&'t str> },
    Cluster { aliases: Vec<char>, value: Option<&'t str> },
}

/// Named flags plus aliases for one command, and their parsed state.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: IndexMap<String, Flag>,
    aliases: BTreeMap<char, String>,
    touched: HashSet<String>,
    explicit: HashSet<String>,
    builtins: HashSet<String>,
    inherited: HashSet<String>,
    version_flag: bool,
    terminated: bool,
    parsed: bool,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `name`. Its current rendering becomes the
    /// default shown in usage text, and its current state is restored when
    /// the flag is not given.
    pub fn define(
        &mut self,
        value: impl Value + 'static,
        name: &str,
        usage: &str,
    ) -> Result<(), ConfigError> {
        self.define_boxed(Box::new(value), name, usage)
    }

    pub fn define_boxed(
        &mut self,
        value: Box<dyn Value>,
        name: &str,
        usage: &str,
    ) -> Result<(), ConfigError> {
        if self.flags.contains_key(name) {
            return Err(ConfigError::DuplicateFlag(name.to_string()));
        }
        let flag = Flag {
            name: name.to_string(),
            usage: usage.to_string(),
            default: value.render(),
            initial: value.clone(),
            value,
        };
        self.flags.insert(name.to_string(), flag);
        Ok(())
    }

    pub fn define_bool(&mut self, name: &str, default: bool, usage: &str) -> Result<(), ConfigError> {
        self.define(Bool(default), name, usage)
    }

    pub fn define_i32(&mut self, name: &str, default: i32, usage: &str) -> Result<(), ConfigError> {
        self.define(Number(default), name, usage)
    }

    pub fn define_i64(&mut self, name: &str, default: i64, usage: &str) -> Result<(), ConfigError> {
        self.define(Number(default), name, usage)
    }

    pub fn define_u32(&mut self, name: &str, default: u32, usage: &str) -> Result<(), ConfigError> {
        self.define(Number(default), name, usage)
    }

    pub fn define_u64(&mut self, name: &str, default: u64, usage: &str) -> Result<(), ConfigError> {
        self.define(Number(default), name, usage)
    }

    pub fn define_f64(&mut self, name: &str, default: f64, usage: &str) -> Result<(), ConfigError> {
        self.define(Number(default), name, usage)
    }

    pub fn define_string(&mut self, name: &str, default: &str, usage: &str) -> Result<(), ConfigError> {
        self.define(Text(default.to_string()), name, usage)
    }

    pub fn define_duration(
        &mut self,
        name: &str,
        default: Duration,
        usage: &str,
    ) -> Result<(), ConfigError> {
        self.define(Span(default), name, usage)
    }

    /// Bind the single character `alias` to the already defined flag `name`.
    pub fn alias(&mut self, alias: char, name: &str) -> Result<(), ConfigError> {
        if !self.flags.contains_key(name) {
            return Err(ConfigError::UndefinedFlag(name.to_string()));
        }
        if let Some(bound) = self.aliases.get(&alias) {
            return Err(ConfigError::AliasTaken {
                alias,
                flag: bound.clone(),
            });
        }
        self.aliases.insert(alias, name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Current value of `name`, once it has been set or back-filled.
    pub fn value(&self, name: &str) -> Option<&dyn Value> {
        if !self.touched.contains(name) {
            return None;
        }
        self.flags.get(name).map(Flag::value)
    }

    /// Typed read-back of a built-in or custom value.
    ///
    /// `get::<bool>`, `get::<i64>`, `get::<String>`, `get::<Duration>`, ...
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.value(name)?.as_any().downcast_ref::<T>()
    }

    /// Rendered value of every materialized flag, in definition order.
    pub fn values(&self) -> IndexMap<String, String> {
        self.flags
            .iter()
            .filter(|(name, _)| self.touched.contains(name.as_str()))
            .map(|(name, flag)| (name.clone(), flag.value.render()))
            .collect()
    }

    /// Aliases bound to `name`, in character order.
    pub fn aliases_of(&self, name: &str) -> Vec<char> {
        self.aliases
            .iter()
            .filter(|(_, flag)| flag.as_str() == name)
            .map(|(alias, _)| *alias)
            .collect()
    }

    /// Whether `name` was given on the command line rather than back-filled.
    pub fn is_set_explicitly(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of flags holding a materialized value.
    pub fn set_count(&self) -> usize {
        self.touched.len()
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Whether `name` was auto-registered as `--help`/`--version`.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
    }

    /// Whether `name` was re-exposed from an ancestor command.
    pub fn is_inherited(&self, name: &str) -> bool {
        self.inherited.contains(name)
    }

    /// Have [`install_builtins`](Self::install_builtins) register `--version`
    /// as well. Set by commands that carry a version string.
    pub fn enable_version_flag(&mut self) {
        self.version_flag = true;
    }

    /// Register `--help`/`-h`, and `--version`/`-v` when enabled, unless flags
    /// of those names already exist. Safe to call repeatedly.
    pub fn install_builtins(&mut self) {
        self.install_builtin(HELP_FLAG, 'h', "show help and exit");
        if self.version_flag {
            self.install_builtin(VERSION_FLAG, 'v', "show version and exit");
        }
    }

    fn install_builtin(&mut self, name: &str, alias: char, usage: &str) {
        if self.flags.contains_key(name) {
            return;
        }
        if self.define_bool(name, false, usage).is_ok() {
            self.builtins.insert(name.to_string());
            if !self.aliases.contains_key(&alias) {
                self.aliases.insert(alias, name.to_string());
            }
        }
    }

    /// Copy `name` from an ancestor's parsed set. The ancestor's current value
    /// is carried over as already set, so back-fill leaves it alone, while the
    /// default stays the one frozen at definition. A flag of the same name
    /// already defined in this set wins; aliases are carried only where the
    /// character is free.
    pub(crate) fn inherit(&mut self, ancestor: &FlagSet, name: &str) {
        if self.flags.contains_key(name) || ancestor.is_builtin(name) {
            return;
        }
        let Some(source) = ancestor.flags.get(name) else {
            return;
        };
        let flag = Flag {
            name: source.name.clone(),
            usage: source.usage.clone(),
            default: source.default.clone(),
            initial: source.initial.clone(),
            value: source.value.clone(),
        };
        self.flags.insert(name.to_string(), flag);
        self.inherited.insert(name.to_string());
        if ancestor.touched.contains(name) {
            self.touched.insert(name.to_string());
        }
        for alias in ancestor.aliases_of(name) {
            self.aliases.entry(alias).or_insert_with(|| name.to_string());
        }
    }

    /// Consume leading flag tokens and return the unconsumed suffix.
    ///
    /// Scanning stops at the first non-flag token or at `--`; that token is
    /// returned, not dropped. Every flag not given on the command line is
    /// back-filled with its default before returning, including on the
    /// terminated path.
    pub fn parse<'a>(&mut self, tokens: &'a [String]) -> Result<&'a [String], ParseError> {
        self.install_builtins();
        self.parsed = true;
        let mut i = 0;
        while i < tokens.len() {
            if self.terminated {
                break;
            }
            let token = tokens[i].as_str();
            let Some(flag_token) = classify(token)? else {
                tracing::trace!(token, "flag scanning terminated");
                self.terminated = true;
                break;
            };
            match flag_token {
                FlagToken::Long { name, value } => self.assign_long(name, value)?,
                FlagToken::Cluster { aliases, value } => self.assign_cluster(&aliases, value)?,
            }
            i += 1;
        }
        self.fill_defaults();
        Ok(&tokens[i..])
    }

    fn assign_long(&mut self, name: &str, value: Option<&str>) -> Result<(), ParseError> {
        let is_bool = self
            .flags
            .get(name)
            .ok_or_else(|| ParseError::UnknownFlag(name.to_string()))?
            .is_bool_flag();
        match value {
            Some(value) => self.assign(name, value),
            None if is_bool => self.assign(name, "true"),
            None => Err(ParseError::MissingValue(name.to_string())),
        }
    }

    fn assign_cluster(&mut self, aliases: &[char], value: Option<&str>) -> Result<(), ParseError> {
        let mut names = Vec::with_capacity(aliases.len());
        for alias in aliases {
            let name = self
                .aliases
                .get(alias)
                .ok_or(ParseError::UnknownAlias(*alias))?;
            names.push(name.clone());
        }

        // A trailing value belongs to the last alias; everything before it
        // must be satisfiable by presence.
        let (last, presence_only) = match value {
            Some(value) => match names.split_last() {
                Some((last, rest)) => (Some((last.clone(), value)), rest.to_vec()),
                None => return Err(ParseError::InvalidFormat(format!("-={value}"))),
            },
            None => (None, names),
        };

        for name in &presence_only {
            if !self.flags[name.as_str()].is_bool_flag() {
                return Err(ParseError::MissingValue(name.clone()));
            }
            self.assign(name, "true")?;
        }
        if let Some((name, value)) = last {
            self.assign(&name, value)?;
        }
        Ok(())
    }

    fn assign(&mut self, name: &str, raw: &str) -> Result<(), ParseError> {
        self.set(name, raw)?;
        self.explicit.insert(name.to_string());
        Ok(())
    }

    fn set(&mut self, name: &str, raw: &str) -> Result<(), ParseError> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| ParseError::UnknownFlag(name.to_string()))?;
        flag.value
            .set(raw)
            .map_err(|source| ParseError::InvalidValue {
                flag: name.to_string(),
                source,
            })?;
        tracing::trace!(flag = name, value = raw, "flag set");
        self.touched.insert(name.to_string());
        Ok(())
    }

    // Restores the state captured at definition; nothing is re-parsed.
    fn fill_defaults(&mut self) {
        for flag in self.flags.values_mut() {
            if self.touched.insert(flag.name.clone()) {
                flag.value = flag.initial.clone();
            }
        }
    }

    /// One usage line per flag, descriptors padded to a common width:
    /// `  --name, -a="default" # usage text`.
    pub fn usage_lines(&self) -> Vec<String> {
        let rows: Vec<(String, &str)> = self
            .flags
            .values()
            .map(|flag| {
                let mut left = format!("--{}", flag.name);
                for alias in self.aliases_of(&flag.name) {
                    left.push_str(&format!(", -{alias}"));
                }
                if !flag.is_bool_flag() {
                    left.push_str(&format!("=\"{}\"", flag.default));
                }
                (left, flag.usage.as_str())
            })
            .collect();
        let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        rows.into_iter()
            .map(|(left, usage)| format!("  {left:width$} # {usage}"))
            .collect()
    }

    pub fn usage_string(&self) -> String {
        self.usage_lines().join("\n")
    }
}

/// Classify one token. `Ok(None)` means the token ends flag scanning: it does
/// not start with a dash, it is a lone `-`, or it is the `--` terminator.
fn classify(token: &str) -> Result<Option<FlagToken<'_>>, ParseError> {
    let Some(body) = token.strip_prefix('-') else {
        return Ok(None);
    };
    if body.is_empty() || body == "-" {
        return Ok(None);
    }
    if token.ends_with('=') {
        return Err(ParseError::InvalidFormat(token.to_string()));
    }

    if let Some(long) = body.strip_prefix('-') {
        let (name, value) = split_value(long);
        tracing::trace!(token, name, "long flag");
        return Ok(Some(FlagToken::Long { name, value }));
    }

    let (cluster, value) = split_value(body);
    tracing::trace!(token, cluster, "alias cluster");
    Ok(Some(FlagToken::Cluster {
        aliases: cluster.chars().collect(),
        value,
    }))
}

fn split_value(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('=') {
        Some((head, value)) => (head, Some(value)),
        None => (raw, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> FlagSet {
        let mut set = FlagSet::new();
        set.define_bool("all", false, "include everything").unwrap();
        set.define_bool("brief", false, "short output").unwrap();
        set.define_i64("count", 1, "how many").unwrap();
        set.define_string("name", "anon", "who").unwrap();
        set.alias('a', "all").unwrap();
        set.alias('b', "brief").unwrap();
        set.alias('c', "count").unwrap();
        set
    }

    #[test]
    fn long_flag_with_value() {
        let mut set = sample();
        let tokens = argv(&["--count=5"]);
        let rest = set.parse(&tokens).unwrap();
        assert!(rest.is_empty());
        assert_eq!(set.get::<i64>("count"), Some(&5));
    }

    #[test]
    fn long_value_keeps_everything_after_first_equals() {
        let mut set = sample();
        let tokens = argv(&["--name=a=b"]);
        set.parse(&tokens).unwrap();
        assert_eq!(set.get::<String>("name").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn long_flag_without_value_needs_bool() {
        let mut set = sample();
        let tokens = argv(&["--all"]);
        set.parse(&tokens).unwrap();
        assert_eq!(set.get::<bool>("all"), Some(&true));

        let mut set = sample();
        let tokens = argv(&["--count"]);
        assert_eq!(
            set.parse(&tokens).unwrap_err(),
            ParseError::MissingValue("count".to_string())
        );
    }

    #[test]
    fn bool_flag_accepts_explicit_false() {
        let mut set = sample();
        let tokens = argv(&["--all=false"]);
        set.parse(&tokens).unwrap();
        assert_eq!(set.get::<bool>("all"), Some(&false));
    }

    #[test]
    fn unknown_long_flag_and_alias() {
        let mut set = sample();
        let tokens = argv(&["--nope"]);
        assert_eq!(
            set.parse(&tokens).unwrap_err(),
            ParseError::UnknownFlag("nope".to_string())
        );

        let mut set = sample();
        let tokens = argv(&["-az"]);
        assert_eq!(set.parse(&tokens).unwrap_err(), ParseError::UnknownAlias('z'));
    }

    #[test]
    fn trailing_equals_is_invalid_format() {
        for raw in ["--count=", "-c="] {
            let mut set = sample();
            let tokens = argv(&[raw]);
            assert!(
                matches!(set.parse(&tokens), Err(ParseError::InvalidFormat(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn cluster_sets_every_bool_alias() {
        let mut set = sample();
        let tokens = argv(&["-ab"]);
        set.parse(&tokens).unwrap();
        assert_eq!(set.get::<bool>("all"), Some(&true));
        assert_eq!(set.get::<bool>("brief"), Some(&true));
    }

    #[test]
    fn cluster_value_goes_to_last_alias() {
        let mut set = sample();
        let tokens = argv(&["-ac=5"]);
        set.parse(&tokens).unwrap();
        assert_eq!(set.get::<bool>("all"), Some(&true));
        assert_eq!(set.get::<i64>("count"), Some(&5));
    }

    #[test]
    fn cluster_value_cannot_reach_earlier_alias() {
        let mut set = sample();
        let tokens = argv(&["-ca=5"]);
        assert_eq!(
            set.parse(&tokens).unwrap_err(),
            ParseError::MissingValue("count".to_string())
        );
    }

    #[test]
    fn valueless_cluster_with_non_bool_alias_fails() {
        let mut set = sample();
        let tokens = argv(&["-ac"]);
        assert_eq!(
            set.parse(&tokens).unwrap_err(),
            ParseError::MissingValue("count".to_string())
        );
    }

    #[test]
    fn rejected_conversion_is_wrapped() {
        let mut set = sample();
        let tokens = argv(&["--count=many"]);
        match set.parse(&tokens).unwrap_err() {
            ParseError::InvalidValue { flag, source } => {
                assert_eq!(flag, "count");
                assert_eq!(source.input, "many");
            }
            other => panic!("expected InvalidValue, got: {other:?}"),
        }
    }

    #[test]
    fn terminator_is_returned_with_the_rest() {
        let mut set = sample();
        let tokens = argv(&["-a", "--", "--brief", "-c=3", "x"]);
        let rest = set.parse(&tokens).unwrap();
        assert_eq!(rest, &tokens[1..]);
        assert!(set.is_terminated());
        assert_eq!(set.get::<bool>("brief"), Some(&false));
        assert_eq!(set.get::<i64>("count"), Some(&1));
    }

    #[test]
    fn two_char_alias_is_not_a_terminator() {
        let mut set = sample();
        let tokens = argv(&["-b", "rest"]);
        let rest = set.parse(&tokens).unwrap();
        assert_eq!(rest, &tokens[1..]);
        assert_eq!(set.get::<bool>("brief"), Some(&true));
    }

    #[test]
    fn first_positional_stops_scanning() {
        let mut set = sample();
        let tokens = argv(&["--all", "file", "--brief"]);
        let rest = set.parse(&tokens).unwrap();
        assert_eq!(rest, &tokens[1..]);
        assert_eq!(set.get::<bool>("brief"), Some(&false));

        let tokens = argv(&["--brief"]);
        assert_eq!(set.parse(&tokens).unwrap(), &tokens[..]);
    }

    #[test]
    fn parse_after_termination_returns_every_token() {
        let mut set = sample();
        let tokens = argv(&["x"]);
        set.parse(&tokens).unwrap();
        assert!(set.is_terminated());

        let tokens = argv(&["-a", "--brief", "--count=4"]);
        assert_eq!(set.parse(&tokens).unwrap(), &tokens[..]);
        assert_eq!(set.get::<bool>("all"), Some(&false));
        assert_eq!(set.get::<bool>("brief"), Some(&false));
        assert_eq!(set.get::<i64>("count"), Some(&1));
        assert!(!set.is_set_explicitly("all"));
    }

    #[test]
    fn lone_dash_is_positional() {
        let mut set = sample();
        let tokens = argv(&["-", "-a"]);
        assert_eq!(set.parse(&tokens).unwrap(), &tokens[..]);
    }

    #[test]
    fn defaults_fill_every_flag() {
        let mut set = sample();
        set.enable_version_flag();
        assert_eq!(set.set_count(), 0);
        let tokens = argv(&["-a"]);
        set.parse(&tokens).unwrap();
        assert_eq!(set.set_count(), set.len());
        assert!(set.is_set_explicitly("all"));
        assert!(!set.is_set_explicitly("name"));
        assert_eq!(set.value("name").map(|v| v.render()).as_deref(), Some("anon"));
        assert_eq!(set.value("count").map(|v| v.render()).as_deref(), Some("1"));
    }

    #[test]
    fn defaults_fill_even_on_empty_input() {
        let mut set = sample();
        set.parse(&[]).unwrap();
        assert!(set.is_parsed());
        assert_eq!(set.set_count(), set.len());
    }

    /// Renders as text its own `set` rejects.
    #[derive(Debug, Clone)]
    struct Opaque(u8);

    impl Value for Opaque {
        fn set(&mut self, raw: &str) -> Result<(), crate::error::ValueError> {
            self.0 = raw
                .parse()
                .map_err(|e| crate::error::ValueError::new(raw, "u8", e))?;
            Ok(())
        }

        fn render(&self) -> String {
            format!("<{}>", self.0)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn boxed_clone(&self) -> Box<dyn Value> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn back_fill_restores_state_without_reparsing() {
        let mut set = FlagSet::new();
        set.define(Opaque(7), "level", "opaque level").unwrap();
        assert_eq!(set.flag("level").map(Flag::default_value), Some("<7>"));

        set.parse(&[]).unwrap();
        assert_eq!(set.get::<Opaque>("level").map(|v| v.0), Some(7));
        assert!(!set.is_set_explicitly("level"));
    }

    #[test]
    fn redefinition_fails_regardless_of_type() {
        let mut set = sample();
        assert_eq!(
            set.define_string("count", "x", "again").unwrap_err(),
            ConfigError::DuplicateFlag("count".to_string())
        );
        assert_eq!(
            set.define_bool("all", true, "again").unwrap_err(),
            ConfigError::DuplicateFlag("all".to_string())
        );
    }

    #[test]
    fn alias_requires_defined_flag_and_free_char() {
        let mut set = sample();
        assert_eq!(
            set.alias('x', "missing").unwrap_err(),
            ConfigError::UndefinedFlag("missing".to_string())
        );
        assert_eq!(
            set.alias('a', "brief").unwrap_err(),
            ConfigError::AliasTaken {
                alias: 'a',
                flag: "all".to_string()
            }
        );
    }

    #[test]
    fn builtins_are_idempotent_and_respect_user_flags() {
        let mut set = FlagSet::new();
        set.define_string("version", "", "pin a version").unwrap();
        set.enable_version_flag();
        set.install_builtins();
        set.parse(&[]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.is_builtin("help"));
        assert!(!set.is_builtin("version"));
        assert_eq!(set.aliases_of("help"), vec!['h']);
        assert!(set.aliases_of("version").is_empty());

        let mut plain = FlagSet::new();
        plain.parse(&[]).unwrap();
        assert!(plain.contains("help"));
        assert!(!plain.contains("version"));
    }

    #[test]
    fn inherited_flag_carries_ancestor_value_and_frozen_default() {
        let mut parent = sample();
        let tokens = argv(&["--count=9"]);
        parent.parse(&tokens).unwrap();

        let mut child = FlagSet::new();
        child.define_i64("depth", 0, "levels").unwrap();
        child.inherit(&parent, "count");
        assert!(child.is_inherited("count"));
        assert_eq!(child.aliases_of("count"), vec!['c']);
        assert_eq!(child.flag("count").map(Flag::default_value), Some("1"));

        child.parse(&[]).unwrap();
        assert_eq!(child.get::<i64>("count"), Some(&9));
        assert!(!child.is_set_explicitly("count"));
        assert!(
            child
                .usage_lines()
                .iter()
                .any(|line| line.starts_with("  --count, -c=\"1\"")),
            "{:?}",
            child.usage_lines()
        );

        let mut child_again = child.clone();
        let tokens = argv(&["-c=2"]);
        child_again.parse(&tokens).unwrap();
        assert_eq!(child_again.get::<i64>("count"), Some(&2));
        assert_eq!(parent.get::<i64>("count"), Some(&9));
    }

    #[test]
    fn usage_lines_are_padded_and_skip_bool_defaults() {
        let mut set = FlagSet::new();
        set.define_bool("verbose", false, "chatty").unwrap();
        set.define_string("out", "out.txt", "output file").unwrap();
        set.alias('v', "verbose").unwrap();
        let lines = set.usage_lines();
        assert_eq!(
            lines,
            vec![
                "  --verbose, -v   # chatty".to_string(),
                "  --out=\"out.txt\" # output file".to_string(),
            ]
        );
        assert_eq!(set.usage_string(), lines.join("\n"));
    }
}
