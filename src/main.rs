//! eboss-sizer entry point: CLI wiring and config-driven report construction.

mod cli;

use std::path::Path;
use std::process;

use eboss_sizer::config::ScenarioConfig;
use eboss_sizer::io::export::export_csv;
use eboss_sizer::logging::init_tracing;
use eboss_sizer::reference::ReferenceData;
use eboss_sizer::report::SizingReport;
use eboss_sizer::sizing::SpecCache;

fn main() {
    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    init_tracing(cli.log_json);

    let data = match cli.reference.as_deref() {
        Some(path) => ReferenceData::from_toml_file(path).unwrap_or_else(|e| {
            tracing::error!("{e}");
            process::exit(1);
        }),
        None => ReferenceData::builtin(),
    };
    data.log_data_quality();

    // --scenario takes priority, then --preset, then the baseline default
    let scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let scenario = scenario.unwrap_or_else(|e| {
        tracing::error!("{e}");
        process::exit(1);
    });

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            tracing::error!("{e}");
        }
        process::exit(1);
    }

    let mut cache = SpecCache::new();
    let report = SizingReport::build(&data, &mut cache, &scenario).unwrap_or_else(|e| {
        tracing::error!("{e}");
        process::exit(1);
    });

    println!("{report}");

    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_csv(&report, Path::new(path)) {
            tracing::error!("failed to write CSV: {e}");
            process::exit(1);
        }
        tracing::info!(path = %path.display(), "cost rows written");
    }

    #[cfg(feature = "api")]
    {
        if cli.serve {
            use std::net::SocketAddr;
            use std::sync::Arc;

            use eboss_sizer::api::AppState;

            let state = Arc::new(AppState::new(data));
            let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
            let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
                tracing::error!("failed to create tokio runtime: {e}");
                process::exit(1);
            });
            if let Err(e) = rt.block_on(eboss_sizer::api::serve(state, addr)) {
                tracing::error!("server error: {e}");
                process::exit(1);
            }
        }
    }
}
