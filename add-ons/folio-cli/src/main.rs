//! Folio CLI
//!
//! Inspect portfolio collections from the command line. Output is JSON on
//! stdout; logs go to stderr (`RUST_LOG`, default `info`).
//!
//! ```text
//! folio list <collection> [--category C] [--category-field F] [--text T] [--fields a,b] [--offset N] [--limit N]
//! folio get <collection> <code>
//! folio search <collection> <query> [field ...]
//! folio general <collection>
//! folio experience|education|project|reference|skill|domain <code>
//! folio experiences
//! folio preload
//! folio config
//! ```

use folio_core::{CollectionKind, FolioConfig, ListQuery, Portfolio};
use serde::Serialize;
use serde_json::Value;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const USAGE: &str = "usage: folio <list|get|search|general|experience|education|project|reference|skill|domain|experiences|preload|config> [args]";

/// Run `$body` with `$repo` bound to the repository for `$kind`.
macro_rules! with_repo {
    ($portfolio:expr, $kind:expr, |$repo:ident| $body:expr) => {
        match $kind {
            CollectionKind::Companies => { let $repo = &*$portfolio.companies; $body }
            CollectionKind::Customers => { let $repo = &*$portfolio.customers; $body }
            CollectionKind::Domains => { let $repo = &*$portfolio.domains; $body }
            CollectionKind::Education => { let $repo = &**$portfolio.education; $body }
            CollectionKind::Experience => { let $repo = &**$portfolio.experience; $body }
            CollectionKind::Partners => { let $repo = &*$portfolio.partners; $body }
            CollectionKind::People => { let $repo = &*$portfolio.people; $body }
            CollectionKind::Projects => { let $repo = &*$portfolio.projects; $body }
            CollectionKind::References => { let $repo = &**$portfolio.references; $body }
            CollectionKind::Skills => { let $repo = &*$portfolio.skills; $body }
        }
    };
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[folio] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[folio] {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> CliResult<String> {
    let (command, rest) = args.split_first().ok_or(USAGE)?;

    let config = FolioConfig::load()?;
    if command == "config" {
        return Ok(toml::to_string_pretty(&config)?);
    }

    let portfolio = Portfolio::from_config(&config)?;
    tracing::debug!(command = %command, data_root = %config.data_root, "folio started");

    let value = match command.as_str() {
        "list" => {
            let kind = kind_arg(rest)?;
            let query = parse_query(&rest[1..])?;
            with_repo!(portfolio, kind, |repo| to_json(query.apply(repo.get_list().await)))?
        }
        "get" => {
            let kind = kind_arg(rest)?;
            let code = rest.get(1).map(String::as_str);
            with_repo!(portfolio, kind, |repo| to_json(repo.get_by_code(code).await))?
        }
        "search" => {
            let kind = kind_arg(rest)?;
            let query = rest.get(1).map(String::as_str).unwrap_or("");
            let fields: Vec<&str> = rest.iter().skip(2).map(String::as_str).collect();
            let fields = (!fields.is_empty()).then_some(fields.as_slice());
            with_repo!(portfolio, kind, |repo| to_json(repo.search(query, fields).await))?
        }
        "general" => {
            let kind = kind_arg(rest)?;
            with_repo!(portfolio, kind, |repo| to_json(repo.general().await))?
        }
        "experience" => to_json(portfolio.experience_view(code_arg(rest)).await)?,
        "education" => to_json(portfolio.education_view(code_arg(rest)).await)?,
        "project" => to_json(portfolio.project_view(code_arg(rest)).await)?,
        "reference" => to_json(portfolio.reference_view(code_arg(rest)).await)?,
        "skill" => to_json(portfolio.skill_usage(code_arg(rest)).await)?,
        "domain" => to_json(portfolio.domain_usage(code_arg(rest)).await)?,
        "experiences" => to_json(portfolio.experience_views().await)?,
        "preload" => {
            portfolio.preload().await;
            let mut counts = serde_json::Map::new();
            for kind in CollectionKind::ALL {
                let n = with_repo!(portfolio, kind, |repo| repo.get_list().await.len());
                counts.insert(kind.name().to_string(), Value::from(n));
            }
            Value::Object(counts)
        }
        other => return Err(format!("unknown command: {other}\n{USAGE}").into()),
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

fn to_json<T: Serialize>(value: T) -> serde_json::Result<Value> {
    serde_json::to_value(value)
}

fn kind_arg(rest: &[String]) -> CliResult<CollectionKind> {
    let name = rest.first().ok_or("missing collection name")?;
    Ok(name.parse()?)
}

fn code_arg(rest: &[String]) -> Option<&str> {
    rest.first().map(String::as_str)
}

/// Parse `--flag value` pairs into a [`ListQuery`].
fn parse_query(flags: &[String]) -> CliResult<ListQuery> {
    let mut query = ListQuery::new();
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("{flag} needs a value"))?;
        query = match flag.as_str() {
            "--category" => query.category(value),
            "--category-field" => query.category_field(value),
            "--text" => query.text(value),
            "--fields" => query.fields(value.split(',').map(str::trim)),
            "--offset" => {
                query.offset = value.parse()?;
                query
            }
            "--limit" => {
                query.limit = Some(value.parse()?);
                query
            }
            other => return Err(format!("unknown flag: {other}").into()),
        };
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn parses_list_flags() {
        let q = parse_query(&args("--category Backend --text rust --fields title,code --offset 1 --limit 2")).unwrap();
        assert_eq!(q.category.as_deref(), Some("Backend"));
        assert_eq!(q.text.as_deref(), Some("rust"));
        assert_eq!(q.fields, Some(vec!["title".to_string(), "code".to_string()]));
        assert_eq!(q.offset, 1);
        assert_eq!(q.limit, Some(2));
    }

    #[test]
    fn rejects_bad_flags() {
        assert!(parse_query(&args("--category")).is_err());
        assert!(parse_query(&args("--colour red")).is_err());
        assert!(parse_query(&args("--limit many")).is_err());
    }

    #[test]
    fn collection_name_is_required_and_checked() {
        assert!(kind_arg(&[]).is_err());
        assert!(kind_arg(&args("widgets")).is_err());
        assert_eq!(kind_arg(&args("People")).unwrap(), CollectionKind::People);
    }
}
