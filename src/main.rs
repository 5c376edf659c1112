use std::collections::BTreeMap;
use std::env;
use std::io::{self, Read};
use std::process;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use zenith_actions::{
    resolve_action_target, ActionPlan, AttributeMap, ClientApi, ClientApiConfig, Diagnostic,
    DiagnosticLevel, PlanCache, RouteEntry, RouteTable,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CliInput {
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    targets: Vec<String>,
    #[serde(default)]
    routes: BTreeMap<String, RouteEntry<Value>>,
    #[serde(default)]
    calls: Vec<CallInput>,
    #[serde(default)]
    requests: Vec<RequestInput>,
    #[serde(default)]
    config: Option<ClientApiConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CallInput {
    route: String,
    #[serde(default)]
    args: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestInput {
    method: String,
    path: String,
}

#[derive(Debug, Default, Serialize)]
struct CliReport {
    actions: Vec<ActionReport>,
    targets: Vec<TargetReport>,
    bindings: Vec<BindingReport>,
    matches: Vec<MatchReport>,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Serialize)]
struct ActionReport {
    expression: String,
    plan: Option<ActionPlan>,
}

#[derive(Debug, Serialize)]
struct TargetReport {
    value: String,
    selector: Option<String>,
}

#[derive(Debug, Serialize)]
struct BindingReport {
    route: String,
    attributes: AttributeMap,
    html: String,
}

#[derive(Debug, Serialize)]
struct MatchReport {
    method: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<Value>,
    params: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct CliArgs {
    prefix: Option<String>,
    strict: bool,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("[zenith-actions] {:#}", err);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> anyhow::Result<()> {
    let args = parse_args()?;

    let mut stdin_payload = String::new();
    io::stdin()
        .read_to_string(&mut stdin_payload)
        .context("failed to read stdin")?;

    if stdin_payload.trim().is_empty() {
        bail!("stdin payload is empty");
    }

    let input: CliInput = serde_json::from_str(&stdin_payload).context("invalid input JSON")?;

    let report = build_report(input, &args)?;
    let out = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{out}");
    Ok(())
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prefix" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("missing value for --prefix"))?;
                parsed.prefix = Some(value);
            }
            "--strict" => parsed.strict = true,
            _ => bail!(
                "unknown argument '{arg}'. usage: zenith-actions [--prefix <prefix>] [--strict] < payload.json"
            ),
        }
    }

    Ok(parsed)
}

fn build_report(input: CliInput, args: &CliArgs) -> anyhow::Result<CliReport> {
    let mut report = CliReport::default();

    let cache = PlanCache::new();
    for expression in input.actions {
        let plan = cache.get_or_parse(&expression);
        if plan.is_none() {
            report.diagnostics.push(
                Diagnostic::new(DiagnosticLevel::Warning, "action expression did not parse")
                    .with_context(expression.clone()),
            );
        }
        report.actions.push(ActionReport { expression, plan });
    }

    for value in input.targets {
        let selector = resolve_action_target(&value);
        report.targets.push(TargetReport { value, selector });
    }

    let mut config = input.config.unwrap_or_default();
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }

    // Both sides are derived from the same route map.
    let mut table = RouteTable::new();
    let mut route_names = Vec::new();
    for (name, entry) in &input.routes {
        if let RouteEntry::Route(route) = entry {
            table
                .add(route.clone())
                .with_context(|| format!("route '{name}' failed to compile"))?;
            route_names.push(name.clone());
        }
    }
    let api = ClientApi::with_config(config, input.routes);

    for name in api.skipped() {
        report.diagnostics.push(
            Diagnostic::new(DiagnosticLevel::Warning, "skipped malformed route entry")
                .with_context(name.clone()),
        );
    }

    for call in input.calls {
        let Some(binding) = api.get(&call.route) else {
            report.diagnostics.push(
                Diagnostic::new(DiagnosticLevel::Error, "unknown route binding")
                    .with_context(call.route),
            );
            continue;
        };

        let supplied = call.args.len().min(binding.param_names().len());
        if args.strict && supplied < binding.param_names().len() {
            bail!(
                "route '{}' expects {} path parameters, got {}",
                call.route,
                binding.param_names().len(),
                supplied
            );
        }

        let attributes = binding.call_positional(&call.args);
        let html = attributes.to_html();
        report.bindings.push(BindingReport {
            route: call.route,
            attributes,
            html,
        });
    }

    for request in input.requests {
        let matched = table.match_request(&request.method, &request.path);
        let (route, handler, params) = match matched {
            Some(m) => {
                let route_name = table
                    .iter()
                    .position(|r| std::ptr::eq(r, m.route))
                    .and_then(|i| route_names.get(i).cloned());
                (route_name, Some(m.handler.clone()), m.params)
            }
            None => {
                report.diagnostics.push(
                    Diagnostic::new(DiagnosticLevel::Info, "no route matched")
                        .with_context(format!("{} {}", request.method, request.path)),
                );
                (None, None, BTreeMap::new())
            }
        };
        report.matches.push(MatchReport {
            method: request.method,
            path: request.path,
            route,
            handler,
            params,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> CliInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_report_round_trip() {
        let payload = input(json!({
            "actions": ["toggle(1)", "broken("],
            "targets": ["role:submit"],
            "routes": {
                "toggle": {"method": "PATCH", "path": "/api/todos/:id/toggle", "handler": "todos.toggle"},
                "bogus": "nope"
            },
            "calls": [{"route": "toggle", "args": ["123"]}],
            "requests": [{"method": "patch", "path": "/api/todos/123/toggle"}]
        }));

        let report = build_report(payload, &CliArgs::default()).unwrap();
        assert!(report.actions[0].plan.is_some());
        assert!(report.actions[1].plan.is_none());
        assert_eq!(
            report.targets[0].selector.as_deref(),
            Some("[data-role=\"submit\"]")
        );
        assert_eq!(
            report.bindings[0].attributes.get("hx-patch"),
            Some("/api/todos/123/toggle")
        );
        assert_eq!(report.matches[0].route.as_deref(), Some("toggle"));
        assert_eq!(report.matches[0].params.get("id").map(String::as_str), Some("123"));
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[test]
    fn test_strict_rejects_missing_params() {
        let payload = input(json!({
            "routes": {"toggle": {"method": "PATCH", "path": "/t/:id", "handler": null}},
            "calls": [{"route": "toggle"}]
        }));
        let args = CliArgs {
            prefix: None,
            strict: true,
        };
        assert!(build_report(payload, &args).is_err());
    }

    #[test]
    fn test_prefix_flag_overrides_config() {
        let payload = input(json!({
            "routes": {"list": {"method": "GET", "path": "/items", "handler": 1}},
            "calls": [{"route": "list"}],
            "config": {"prefix": "hx"}
        }));
        let args = CliArgs {
            prefix: Some("data-zx".into()),
            strict: false,
        };
        let report = build_report(payload, &args).unwrap();
        assert_eq!(report.bindings[0].attributes.get("data-zx-get"), Some("/items"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<CliInput, _> = serde_json::from_value(json!({"acts": []}));
        assert!(result.is_err());
    }
}
