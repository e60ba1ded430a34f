//! Flag parsing and nested subcommand dispatch.
//!
//! A [`Command`] owns a [`FlagSet`], a [`ParamSet`] and any number of child
//! commands. Dispatching a token list parses the leading flags, descends into a
//! matching child (repeating the cycle), and finally binds what is left to the
//! declared params and runs exactly one handler.
//!
//! # Example
//!
//! ```rust,ignore
//! use flagtree::{Command, Outcome};
//!
//! let mut root = Command::root("1.0.0", "file tools", |ctx| {
//!     println!("{}", ctx.usage());
//!     Ok(())
//! });
//! root.flags_mut().define_bool("verbose", false, "log more")?;
//! root.flags_mut().alias('V', "verbose")?;
//! root.propagate("verbose")?;
//!
//! let copy = root.add_command(flagtree::Command::new("copy", "copy a file", |ctx| {
//!     let verbose = ctx.get::<bool>("verbose").copied().unwrap_or_default();
//!     println!("copy {:?} -> {:?} (verbose: {verbose})", ctx.param("src"), ctx.param("dst"));
//!     Ok(())
//! }))?;
//! copy.define_params(["src", "dst"]);
//!
//! root.start()?;
//! ```

pub mod command;
pub mod error;
pub mod flag;
pub mod params;
pub mod value;

pub use command::{Command, Context, ErrorHandling, Handler, Outcome};
pub use error::{ConfigError, DispatchError, ParseError, ValueError};
pub use flag::{Flag, FlagSet};
pub use params::ParamSet;
pub use value::{Bool, Number, Span, Text, Value};
