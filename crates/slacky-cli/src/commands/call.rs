//! Call command - invoke any Slack method.

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use serde_json::{Map, Value};

use slacky::{Method, factory};

use super::Context;

/// HTTP verb override for methods without typed support.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Verb {
    Get,
    Post,
}

/// Arguments for the call command.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Slack method name (e.g. conversations.info)
    pub method: String,

    /// Parameters as key=value; true/false and JSON arrays or objects are
    /// sent as JSON, anything else as a string
    pub params: Vec<String>,

    /// HTTP verb; required for methods `slacky methods` does not list
    #[arg(long, value_enum)]
    pub verb: Option<Verb>,
}

/// Run the call command.
pub async fn run(args: CallArgs, ctx: &Context) -> Result<()> {
    let params = parse_params(&args.params)?;
    let client = ctx.client()?;

    let response = match args.verb {
        Some(verb) => {
            let method = match verb {
                Verb::Get => Method::GET,
                Verb::Post => Method::POST,
            };
            client.call(method, &args.method, &params).await?
        }
        None => {
            if factory::descriptor(&args.method).is_none() {
                bail!(
                    "unknown method '{}'; pass --verb get|post to call it anyway",
                    args.method
                );
            }
            client.call_named(&args.method, &params).await?
        }
    };

    for warning in response.warnings() {
        tracing::warn!(%warning, "Slack warning");
    }
    ctx.print_json(response.body())
}

/// Turn `key=value` pairs into a parameter object.
fn parse_params(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("parameter '{}' is not key=value", pair);
        };
        if key.is_empty() {
            bail!("parameter '{}' has an empty key", pair);
        }
        let value = match serde_json::from_str::<Value>(value) {
            // Numbers stay strings so timestamps keep their digits.
            Ok(parsed @ (Value::Bool(_) | Value::Array(_) | Value::Object(_))) => parsed,
            _ => Value::String(value.to_string()),
        };
        params.insert(key.to_string(), value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_params() {
        let params = parse_params(&pairs(&[
            "channel=C123",
            "limit=50",
            "inclusive=true",
            "text=a=b",
            "oldest=1512085950.000216",
            "users=[\"U1\",\"U2\"]",
        ]))
        .unwrap();
        assert_eq!(
            Value::Object(params),
            json!({
                "channel": "C123",
                "limit": "50",
                "inclusive": true,
                "text": "a=b",
                "oldest": "1512085950.000216",
                "users": ["U1", "U2"]
            })
        );
    }

    #[test]
    fn test_parse_params_rejects_bare_words() {
        assert!(parse_params(&pairs(&["channel"])).is_err());
        assert!(parse_params(&pairs(&["=x"])).is_err());
    }
}
