//! End-to-end session flow against a running backend.
//!
//! Restores a stored session or logs in, prints the dashboard, then
//! generates a PDF for the first lead magnet.
//!
//! Run with:
//! ```bash
//! LEADFORGE_API_BASE_URL=http://localhost:8000 \
//! LEADFORGE_SESSION_FILE=/tmp/leadforge-session.json \
//! LEADFORGE_EMAIL=ada@example.com LEADFORGE_PASSWORD=s3cret \
//! cargo run --example session_flow
//! ```

use leadforge::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    leadforge::init_tracing();

    let app = LeadForge::from_env()?;

    let user = match app.auth().restore().await? {
        Some(user) => user,
        None => {
            let email = std::env::var("LEADFORGE_EMAIL")?;
            let password = std::env::var("LEADFORGE_PASSWORD")?;
            app.auth().login(&email, &password).await?
        }
    };
    println!("Signed in as {} <{}>", user.username, user.email);

    let stats = app.dashboard().stats().await?;
    println!(
        "Lead magnets: {} total, {} active, {} downloads",
        stats.total_lead_magnets.unwrap_or(0),
        stats.active_lead_magnets.unwrap_or(0),
        stats.total_downloads.unwrap_or(0),
    );

    let magnets = app.dashboard().lead_magnets().await?;
    let Some(first) = magnets.first() else {
        println!("No lead magnets yet");
        return Ok(());
    };

    let request = PdfRequest::new(first.id.clone()).answer("audience", "small businesses");
    match app.generation().generate_pdf(&request).await {
        Ok(pdf) => {
            let path = pdf.save(std::env::temp_dir()).await?;
            println!("Saved {} ({} bytes)", path.display(), pdf.len());
        }
        Err(ClientError::Unauthenticated { reason, .. }) => {
            println!("Session expired: {}", reason);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
