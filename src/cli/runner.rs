//! CLI command execution

use super::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, ServiceConfig};
use crate::error::{Error, Result};
use crate::factory::{ServiceFactory, SourceType};
use crate::service::PagedDataService;
use crate::types::Page;
use serde_json::Value;
use std::str::FromStr;
use tracing::info;

/// Executes a parsed CLI invocation
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for a parsed command line
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Validate => self.run_validate(),
            Commands::Count => self.run_count().await,
            Commands::Fetch { pages, page_size } => self.run_fetch(*pages, *page_size).await,
        }
    }

    /// Load the configuration named by `--config`
    fn load(&self) -> Result<ServiceConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::missing_field("--config"))?;
        load_config(path)
    }

    fn run_validate(&self) -> Result<()> {
        let config = self.load()?;
        let source = SourceType::from_str(&config.source)?;
        println!(
            "OK: {} source, page size {}",
            source, config.query.page_size
        );
        Ok(())
    }

    async fn run_count(&self) -> Result<()> {
        let config = self.load()?;
        let service = self.build_service(&config).await?;
        let total = service.total_count().await?;
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "total": total })),
            OutputFormat::Pretty => println!("{total} items"),
        }
        Ok(())
    }

    async fn run_fetch(&self, pages: usize, page_size: Option<usize>) -> Result<()> {
        let config = self.load()?;
        let mut service = self.build_service(&config).await?;
        if let Some(size) = page_size {
            service.set_page_size(size);
        }

        for _ in 0..pages {
            let page = service.next().await;
            self.print_page(service.current_page(), &page)?;
            if !service.has_next() {
                info!("source exhausted");
                break;
            }
        }
        Ok(())
    }

    async fn build_service(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn PagedDataService<Value>>> {
        // No notifier from the shell: one-shot commands need no live updates.
        ServiceFactory::create::<Value>(&config.source, config, None, None).await
    }

    fn print_page(&self, number: usize, page: &Page<Value>) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "page": number,
                    "items": page.items(),
                });
                println!("{line}");
            }
            OutputFormat::Pretty => {
                println!("Page {number} ({} items)", page.len());
                for item in page {
                    println!("  {}", serde_json::to_string(item)?);
                }
            }
        }
        Ok(())
    }
}
