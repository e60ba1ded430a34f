use flagtree::Context;
use indexmap::IndexMap;
use serde::Serialize;

/// Resolved state of one dispatch, as seen by the handler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub command: String,

    /// Rendered value of every user flag, built-ins excluded.
    pub flags: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherited: Vec<String>,

    pub params: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unparsed: Vec<String>,
}

impl Report {
    pub fn from_context(ctx: &Context<'_>) -> Self {
        let set = ctx.flags();
        let flags = set
            .values()
            .into_iter()
            .filter(|(name, _)| !set.is_builtin(name))
            .collect();
        let inherited = set
            .iter()
            .filter(|flag| set.is_inherited(flag.name()))
            .map(|flag| flag.name().to_string())
            .collect();
        Self {
            command: ctx.path().to_string(),
            flags,
            inherited,
            params: ctx.params().values().clone(),
            unparsed: ctx.unparsed_args().to_vec(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("command: {}\n", self.command);
        if !self.flags.is_empty() {
            out.push_str("flags:\n");
            for (name, value) in &self.flags {
                out.push_str(&format!("  --{name}={value}"));
                if self.inherited.contains(name) {
                    out.push_str(" (inherited)");
                }
                out.push('\n');
            }
        }
        if !self.params.is_empty() {
            out.push_str("params:\n");
            for (name, value) in &self.params {
                out.push_str(&format!("  {name}={value}\n"));
            }
        }
        if !self.unparsed.is_empty() {
            out.push_str(&format!("unparsed: {}\n", self.unparsed.join(" ")));
        }
        out
    }
}

/// Print `ctx` as JSON when `--json` is set, as text otherwise.
pub fn print(ctx: &Context<'_>) -> anyhow::Result<()> {
    let report = Report::from_context(ctx);
    if ctx.get::<bool>("json").copied().unwrap_or(false) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
