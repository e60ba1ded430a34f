//! Command tree and dispatcher.
//!
//! A [`Command`] is declared once at setup and is not mutated by dispatch.
//! Each [`Command::dispatch`] call walks the tree with fresh per-run state:
//!
//! 1. clone the command's flags, re-expose the parent's propagating flags, parse
//! 2. if the next token names a child command, descend into it with the rest
//! 3. otherwise bind the rest to the declared params and run the handler
//!
//! Exactly one handler runs per dispatch, on the deepest resolved command.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{ConfigError, DispatchError, ParseError};
use crate::flag::{FlagSet, HELP_FLAG, VERSION_FLAG};
use crate::params::ParamSet;
use crate::value::Value;

/// Handler invoked on the resolved command.
pub type Handler = Box<dyn Fn(&Context<'_>) -> anyhow::Result<()>>;

/// What [`Command::start`] does with a failed dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Print the error and usage to stderr, then exit with status 2 (parse
    /// failures) or 1 (handler failures).
    #[default]
    ExitOnError,
    /// Return the error to the caller.
    ContinueOnError,
    /// Panic with the error message.
    PanicOnError,
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The resolved command's handler ran.
    Ran,
    /// `--help` was given; carries the usage text of the command it was given to.
    Help(String),
    /// `--version` was given; carries `<name> <version>`.
    Version(String),
}

/// A node in the command tree.
pub struct Command {
    name: String,
    description: String,
    version: Option<String>,
    error_handling: ErrorHandling,
    handler: Handler,
    flags: FlagSet,
    params: ParamSet,
    propagating: Vec<String>,
    children: IndexMap<String, Command>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("error_handling", &self.error_handling)
            .field("flags", &self.flags)
            .field("params", &self.params)
            .field("propagating", &self.propagating)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl Command {
    pub fn new<F>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            version: None,
            error_handling: ErrorHandling::default(),
            handler: Box::new(handler),
            flags: FlagSet::new(),
            params: ParamSet::default(),
            propagating: Vec::new(),
            children: IndexMap::new(),
        }
    }

    /// A top-level command named after the running program, with `--version`.
    pub fn root<F>(version: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&Context<'_>) -> anyhow::Result<()> + 'static,
    {
        let name = program_name().unwrap_or_else(|| "app".to_string());
        let mut cmd = Self::new(&name, description, handler);
        cmd.set_version(version);
        cmd
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Enables the built-in `--version`/`-v` flag. An empty string disables it.
    pub fn set_version(&mut self, version: &str) {
        let version = version.trim();
        self.version = (!version.is_empty()).then(|| version.to_string());
    }

    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    pub fn set_error_handling(&mut self, policy: ErrorHandling) {
        self.error_handling = policy;
    }

    pub fn with_error_handling(mut self, policy: ErrorHandling) -> Self {
        self.error_handling = policy;
        self
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Replace the declared positional parameter names.
    pub fn define_params<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.define(names);
    }

    /// Re-expose the flag `name` to every descendant command.
    pub fn propagate(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.flags.contains(name) {
            return Err(ConfigError::UndefinedFlag(name.to_string()));
        }
        if !self.propagating.iter().any(|p| p == name) {
            self.propagating.push(name.to_string());
        }
        Ok(())
    }

    pub fn propagating(&self) -> &[String] {
        &self.propagating
    }

    /// Attach `child` as a subcommand and return it for further setup.
    pub fn add_command(&mut self, child: Command) -> Result<&mut Command, ConfigError> {
        if self.children.contains_key(&child.name) {
            return Err(ConfigError::DuplicateCommand(child.name));
        }
        let name = child.name.clone();
        Ok(self.children.entry(name).or_insert(child))
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.children.get(name)
    }

    pub fn command_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.children.get_mut(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.children.values()
    }

    /// Usage text for this command as a top-level command.
    pub fn usage(&self) -> String {
        let mut flags = self.flags.clone();
        if self.version.is_some() {
            flags.enable_version_flag();
        }
        flags.install_builtins();
        self.render_usage(&self.name, &flags)
    }

    /// Dispatch `args` (program name excluded) and apply the error policy of
    /// the failing command. Help and version text are printed to stdout.
    pub fn start_with<I, S>(&self, args: I) -> Result<Outcome, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.dispatch(args) {
            Ok(outcome) => {
                match &outcome {
                    Outcome::Help(text) | Outcome::Version(text) => println!("{text}"),
                    Outcome::Ran => {}
                }
                Ok(outcome)
            }
            Err(err) => match err.policy() {
                ErrorHandling::ContinueOnError => Err(err),
                ErrorHandling::PanicOnError => panic!("{err}"),
                ErrorHandling::ExitOnError => {
                    eprintln!("error: {err}");
                    let status = match &err {
                        DispatchError::Parse { usage, .. } => {
                            eprintln!("\n{usage}");
                            2
                        }
                        DispatchError::Handler { .. } => 1,
                    };
                    std::process::exit(status)
                }
            },
        }
    }

    /// [`start_with`](Self::start_with) over the process arguments.
    pub fn start(&self) -> Result<Outcome, DispatchError> {
        self.start_with(std::env::args().skip(1))
    }

    /// Resolve and run one command for `args` (program name excluded).
    pub fn dispatch<I, S>(&self, args: I) -> Result<Outcome, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        self.run(&tokens, None)
    }

    fn run<'a>(
        &'a self,
        tokens: &[String],
        parent: Option<&'a Context<'a>>,
    ) -> Result<Outcome, DispatchError> {
        let path = match parent {
            Some(parent) => format!("{} {}", parent.path, self.name),
            None => self.name.clone(),
        };
        tracing::debug!(command = %path, tokens = tokens.len(), "parsing flags");

        let mut flags = self.flags.clone();
        if self.version.is_some() {
            flags.enable_version_flag();
        }
        if let Some(parent) = parent {
            for name in parent.propagating() {
                flags.inherit(&parent.flags, name);
            }
        }

        let rest = match flags.parse(tokens) {
            Ok(rest) => rest,
            Err(source) => return Err(self.parse_failure(path, &flags, source)),
        };

        if flags.is_builtin(HELP_FLAG) && flags.get::<bool>(HELP_FLAG) == Some(&true) {
            return Ok(Outcome::Help(self.render_usage(&path, &flags)));
        }
        if flags.is_builtin(VERSION_FLAG) && flags.get::<bool>(VERSION_FLAG) == Some(&true) {
            let version = self.version.as_deref().unwrap_or_default();
            return Ok(Outcome::Version(format!("{} {version}", self.name)));
        }

        if let Some((first, remaining)) = rest.split_first() {
            if let Some(child) = self.children.get(first.as_str()) {
                tracing::debug!(command = %path, subcommand = %child.name, "resolved subcommand");
                let ctx = Context {
                    command: self,
                    path,
                    flags,
                    params: self.params.clone(),
                    parent,
                };
                return child.run(remaining, Some(&ctx));
            }
        }

        let mut params = self.params.clone();
        params.bind(rest);

        let ctx = Context {
            command: self,
            path,
            flags,
            params,
            parent,
        };
        tracing::debug!(command = %ctx.path, "dispatching handler");
        (self.handler)(&ctx).map_err(|source| DispatchError::Handler {
            command: ctx.path.clone(),
            policy: self.error_handling,
            source,
        })?;
        Ok(Outcome::Ran)
    }

    fn parse_failure(&self, path: String, flags: &FlagSet, source: ParseError) -> DispatchError {
        tracing::debug!(command = %path, error = %source, "flag parsing failed");
        DispatchError::Parse {
            usage: self.render_usage(&path, flags),
            command: path,
            policy: self.error_handling,
            source,
        }
    }

    fn render_usage(&self, path: &str, flags: &FlagSet) -> String {
        let mut synopsis = format!("Usage: {path}");
        if !flags.is_empty() {
            synopsis.push_str(" [options...]");
        }
        for name in self.params.names() {
            synopsis.push_str(&format!(" <{name}>"));
        }
        if !self.children.is_empty() {
            synopsis.push_str(" <command> [arg...]");
        }

        let mut out = synopsis;
        out.push('\n');
        if !self.description.trim().is_empty() {
            out.push('\n');
            out.push_str(self.description.trim_end());
            out.push('\n');
        }

        if !flags.is_empty() {
            out.push_str("\nOptions:\n");
            for line in flags.usage_lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }

        if !self.children.is_empty() {
            out.push_str("\nCommands:\n");
            let width = self.children.keys().map(|k| k.len()).max().unwrap_or(0);
            for child in self.children.values() {
                out.push_str(&format!("  {:width$}  {}\n", child.name, child.description));
            }
        }

        out.trim_end().to_string()
    }
}

fn program_name() -> Option<String> {
    let arg0 = std::env::args_os().next()?;
    Path::new(&arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// The handler's view of one resolved command.
///
/// Holds this command's parsed flags (including those re-exposed from
/// ancestors), its bound params, and a read-only link to the parent's view.
#[derive(Debug)]
pub struct Context<'a> {
    command: &'a Command,
    path: String,
    flags: FlagSet,
    params: ParamSet,
    parent: Option<&'a Context<'a>>,
}

impl<'a> Context<'a> {
    pub fn name(&self) -> &str {
        &self.command.name
    }

    /// Space-separated command path from the root, e.g. `app remote add`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn flag(&self, name: &str) -> Option<&dyn Value> {
        self.flags.value(name)
    }

    pub fn get<T: std::any::Any>(&self, name: &str) -> Option<&T> {
        self.flags.get(name)
    }

    /// Whether `name` came from an ancestor's propagating flags.
    pub fn is_inherited(&self, name: &str) -> bool {
        self.flags.is_inherited(name)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Tokens left over after every declared param was bound.
    pub fn unparsed_args(&self) -> &[String] {
        self.params.unparsed()
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    /// This command's version, or the nearest ancestor's.
    pub fn version(&self) -> Option<&str> {
        self.command
            .version()
            .or_else(|| self.parent.and_then(|p| p.version()))
    }

    pub fn usage(&self) -> String {
        self.command.render_usage(&self.path, &self.flags)
    }

    /// Flags this command passes on to its children: its own propagating flags
    /// followed by those it inherited.
    fn propagating(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.command.propagating.iter().map(String::as_str).collect();
        for flag in self.flags.iter() {
            if self.flags.is_inherited(flag.name()) && !names.contains(&flag.name()) {
                names.push(flag.name());
            }
        }
        names
    }
}
