//! `dnaret config` command implementation
//!
//! Shows the resolved configuration.

use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Mask all but the last four characters of a secret
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Show all configuration
pub async fn show(config: &Config) -> Result<()> {
    println!("{}", "dnaret configuration:".cyan().bold());
    println!();
    println!("{:<15} {}", "credentials:", config.credentials_path.display());
    println!(
        "{:<15} {}",
        "project_id:",
        config.project_id.as_deref().unwrap_or("(from credentials)")
    );
    println!("{:<15} {}", "database:", config.database);
    println!("{:<15} {}", "collection:", config.collection);
    println!("{:<15} {}", "output_dir:", config.output_dir.display());
    println!("{:<15} {}", "firestore_url:", config.base_url());
    println!(
        "{:<15} {}",
        "access_token:",
        config
            .access_token
            .as_deref()
            .map(mask)
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("{:<15} {}", "page_size:", config.page_size);
    println!("{:<15} {}s", "timeout:", config.timeout_secs);
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  DNARET_CREDENTIALS, DNARET_PROJECT_ID, DNARET_DATABASE, DNARET_COLLECTION");
    println!("  DNARET_OUTPUT_DIR, DNARET_FIRESTORE_URL, FIRESTORE_EMULATOR_HOST");
    println!("  DNARET_ACCESS_TOKEN, DNARET_PAGE_SIZE, DNARET_API_TIMEOUT_SECS");

    Ok(())
}
