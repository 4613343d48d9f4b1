use std::path::Path;
use std::process::Command;

/// Run `rustfmt` on a generated file
pub fn format_file(path: &Path) -> anyhow::Result<()> {
    // Allow tests to override the rustfmt binary path without mutating PATH
    let rustfmt_bin = std::env::var("APIGEN_RUSTFMT_BIN").unwrap_or_else(|_| "rustfmt".to_string());

    let mut cmd = Command::new(rustfmt_bin);
    cmd.arg("--edition").arg("2021").arg(path);
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("rustfmt failed on {}", path.display());
    }
    Ok(())
}
