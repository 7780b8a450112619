/// Walks the session lifecycle against the configured store backend.
///
/// $ cargo run --bin session_demo -- --settings=settings/dev.toml --id 1 --type user
///
/// The redis backend expects a server at `store.url`; set
/// `SESSIONGUARD__STORE__BACKEND=memory` to run without one.
use chrono::{Duration, Utc};
use nanoid::nanoid;
use sessionguard::app::App;
use sessionguard::domain_model::{Identity, SessionRecord};
use sessionguard::logger::*;
use sessionguard::settings::*;

#[derive(Parser, Debug)]
struct DemoCli {
    #[arg(long)]
    settings: Option<String>,
    #[arg(long, default_value = "1")]
    id: String,
    #[arg(long = "type", default_value = "user")]
    kind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = DemoCli::parse();

    let logger = Logger::new_bootstrap();

    let mut project_settings = parse_settings(cli.settings.as_deref())?;
    logger.reload_from_settings(&project_settings.log)?;

    // keep demo keys apart from real sessions
    let alphabet: [char; 16] = [
        '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
    ];
    let run_id = nanoid!(10, &alphabet);
    project_settings.store.prefix = if project_settings.store.prefix.is_empty() {
        format!("demo-{}", run_id)
    } else {
        format!("{}:demo-{}", project_settings.store.prefix, run_id)
    };
    info!(?project_settings);

    let app = App::try_new(&project_settings).await?;
    let sessions = app.session_service;
    let identity = Identity::new(&cli.id, cli.kind.clone());

    let first = sessions.open_session(&identity).await?;
    info!(token = %first.token, expires_at = %first.expires_at, "session opened");
    let claims = sessions.decode_token(&first.token).await;
    info!(?claims, "decoded");
    let status = sessions.check(&first.token).await?;
    info!(?status, "first check");

    let expires_at = first.expires_at + Duration::seconds(1);
    let second = sessions.create_token(&identity, Some(expires_at)).await?;
    sessions
        .insert(SessionRecord {
            identity: identity.clone(),
            token: second.clone(),
            expires_at,
        })
        .await?;
    let status = sessions.check(&first.token).await?;
    info!(?status, "first token after re-login");
    let status = sessions.check(&second).await?;
    info!(?status, "second token");

    // an expired token clears whatever session its identity currently holds
    let expired = sessions
        .create_token(&identity, Some(Utc::now() - Duration::seconds(1)))
        .await?;
    let status = sessions.check(&expired).await?;
    info!(?status, "expired token");
    let stored = sessions.stored_token(&identity).await?;
    info!(?stored, "after expired check");

    let reopened = sessions.open_session(&identity).await?;
    let removed = sessions.delete_token(&reopened.token).await?;
    let status = sessions.check(&reopened.token).await?;
    info!(removed, ?status, "logged out");
    let removed = sessions.delete_token("garbage").await?;
    info!(removed, "garbage logout");

    Ok(())
}
