//! Methods command - list typed Slack methods.

use anyhow::Result;
use clap::Args;
use console::Style;

use slacky::factory;

use super::{Context, header};

/// Arguments for the methods command.
#[derive(Args, Debug)]
pub struct MethodsArgs {
    /// Only list methods whose name starts with this prefix (e.g. chat.)
    pub prefix: Option<String>,
}

/// Run the methods command. Needs no token.
pub fn run(args: MethodsArgs, ctx: &Context) -> Result<()> {
    let prefix = args.prefix.unwrap_or_default();
    let methods: Vec<_> = factory::descriptors()
        .iter()
        .filter(|d| d.name.starts_with(&prefix))
        .collect();

    if ctx.json_output {
        let rows: Vec<_> = methods
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "verb": d.method().as_str(),
                    "paginated": d.paginated,
                })
            })
            .collect();
        return ctx.print_json(&rows);
    }

    let dim = Style::new().dim();
    header("Methods");
    for descriptor in &methods {
        let paged = if descriptor.paginated { "paginated" } else { "" };
        println!(
            "{:<6} {:<28} {}",
            descriptor.method().as_str(),
            descriptor.name,
            dim.apply_to(paged)
        );
    }
    Ok(())
}
