use chrono::NaiveDate;
use clap::Parser;
use std::time::Duration;
use visit_report_common::DateRange;
use visit_report_rust::{cli, config, error, report, resize, storage};

use cli::{Cli, Commands};
use config::Config;
use error::{Result, VisitReportError};
use report::{HttpPhotoFetcher, StoragePhotoFetcher};
use storage::LocalStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Report {
            input,
            output,
            subject,
            from,
            to,
            photo_root,
        } => {
            println!("📄 visit-report - Relatorio de Visitas\n");

            println!("[1/3] Lendo visitas...");
            let visits = report::load_visits(&input)?;
            println!("✔ {} visitas carregadas\n", visits.len());

            let range = parse_range(from.as_deref(), to.as_deref())?;
            let subject = subject
                .or(config.default_subject)
                .unwrap_or_else(|| "Promotor".to_string());
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));

            println!("[2/3] Gerando PDF...");
            let (path, summary) = match photo_root {
                Some(root) => {
                    let storage = LocalStorage::new(root);
                    let fetcher = StoragePhotoFetcher::new(&storage);
                    report::write_report(visits, range.as_ref(), &subject, &output_dir, &fetcher)
                        .await?
                }
                None => {
                    let fetcher = HttpPhotoFetcher::new();
                    report::write_report(visits, range.as_ref(), &subject, &output_dir, &fetcher)
                        .await?
                }
            };
            println!(
                "✔ {} visitas, {} lojas, {} fotos\n",
                summary.total_visits, summary.total_stores, summary.total_photos
            );

            println!("[3/3] Salvando...");
            println!("✔ Relatorio salvo: {}", path.display());

            println!("\n✅ Concluido");
        }

        Commands::Resize {
            folder,
            output,
            quality,
        } => {
            println!("🖼  visit-report - Redimensionamento\n");

            let output = output.unwrap_or_else(|| folder.join("resized"));
            println!("[1/1] Redimensionando... (qualidade: {})", quality);
            let outcome = resize::resize_folder(&folder, &output, quality, cli.verbose)?;
            println!("✔ {} fotos redimensionadas", outcome.resized);
            if outcome.failed > 0 {
                println!("⚠ {} fotos ignoradas por erro", outcome.failed);
            }

            println!("\n✅ Concluido: {}", output.display());
        }

        Commands::Storage { root, prefix } => {
            println!("🔍 visit-report - Diagnostico do storage\n");

            let root = root
                .or(config.storage_root)
                .unwrap_or_else(|| std::path::PathBuf::from("./storage"));
            let storage = LocalStorage::new(root);
            let ttl = Duration::from_secs(config.signed_url_ttl_secs);

            // any failure propagates and the process exits non-zero
            storage::run_diagnostics(&storage, &prefix, ttl).await?;

            println!("✅ Storage operacional");
        }

        Commands::Config {
            set_subject,
            set_storage_root,
            show,
        } => {
            let mut config = config;

            if let Some(subject) = set_subject {
                config.set_subject(subject)?;
                println!("✔ Promotor padrao definido");
            }

            if let Some(root) = set_storage_root {
                config.set_storage_root(root)?;
                println!("✔ Raiz do storage definida");
            }

            if show {
                println!("Configuracao:");
                println!(
                    "  Promotor padrao: {}",
                    config.default_subject.as_deref().unwrap_or("(nao definido)")
                );
                println!(
                    "  Raiz do storage: {}",
                    config
                        .storage_root
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(nao definida)".to_string())
                );
                println!("  TTL da URL assinada: {}s", config.signed_url_ttl_secs);
            }
        }
    }

    Ok(())
}

fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(from), Some(to)) => {
            let start = parse_date(from)?;
            let end = parse_date(to)?;
            Ok(Some(DateRange::new(start, end)?))
        }
        _ => Err(VisitReportError::Config(
            "--from and --to must be used together".to_string(),
        )),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| VisitReportError::InvalidDate(s.to_string()))
}
