//! The demonstration command tree.

use std::time::Duration;

use anyhow::{Result, bail};
use flagtree::{Command, ConfigError, Context};

use crate::report;

pub fn build() -> Result<Command, ConfigError> {
    let mut root = Command::root(
        env!("CARGO_PKG_VERSION"),
        "Inspect how flagtree resolves an argument list",
        report::print,
    );
    let flags = root.flags_mut();
    flags.define_bool("verbose", false, "log dispatch decisions")?;
    flags.define_bool("json", false, "print reports as JSON")?;
    flags.alias('V', "verbose")?;
    flags.alias('j', "json")?;
    root.propagate("verbose")?;
    root.propagate("json")?;

    let inspect = root.add_command(Command::new(
        "inspect",
        "print the resolved flags and params",
        report::print,
    ))?;
    inspect.flags_mut().define_u32("depth", 1, "how deep to look")?;
    inspect.flags_mut().define_f64("ratio", 0.5, "a fractional knob")?;
    inspect.flags_mut().alias('d', "depth")?;
    inspect.define_params(["first", "second"]);

    let echo = root.add_command(Command::new("echo", "print the arguments", echo))?;
    echo.flags_mut().define_bool("upper", false, "uppercase the output")?;
    echo.flags_mut().define_u32("repeat", 1, "print this many times")?;
    echo.flags_mut().alias('u', "upper")?;
    echo.flags_mut().alias('n', "repeat")?;

    let remote = root.add_command(Command::new(
        "remote",
        "manage remotes",
        |ctx: &Context<'_>| {
            println!("{}", ctx.usage());
            Ok(())
        },
    ))?;

    let add = remote.add_command(Command::new("add", "add a remote", report::print))?;
    add.flags_mut().define_bool("fetch", false, "fetch after adding")?;
    add.flags_mut()
        .define_duration("timeout", Duration::from_secs(30), "connection timeout")?;
    add.flags_mut().define_string("branch", "main", "branch to track")?;
    add.flags_mut().alias('f', "fetch")?;
    add.flags_mut().alias('t', "timeout")?;
    add.flags_mut().alias('b', "branch")?;
    add.define_params(["name", "url"]);

    let rm = remote.add_command(Command::new("remove", "remove a remote", remove))?;
    rm.define_params(["name"]);

    Ok(root)
}

fn echo(ctx: &Context<'_>) -> Result<()> {
    let mut line = ctx.unparsed_args().join(" ");
    if ctx.get::<bool>("upper").copied().unwrap_or(false) {
        line = line.to_uppercase();
    }
    let repeat = ctx.get::<u32>("repeat").copied().unwrap_or(1);
    tracing::debug!(repeat, "echoing");
    for _ in 0..repeat {
        println!("{line}");
    }
    Ok(())
}

fn remove(ctx: &Context<'_>) -> Result<()> {
    let Some(name) = ctx.param("name") else {
        bail!("missing <name>");
    };
    if ctx.get::<bool>("verbose").copied().unwrap_or(false) {
        tracing::info!(remote = name, "removing remote");
    }
    report::print(ctx)
}
