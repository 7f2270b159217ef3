use tracing::{error, info, warn, Instrument};
use user_forms::app_system::{setup_tracing, SystemConfig, UserSystem};
use user_forms::domain::{Field, SubmittedFields, UserDraft};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application with user directory");

    let system = UserSystem::new(SystemConfig::from_env());
    let client = system.user_client.clone();

    // Create a new account
    let signup: SubmittedFields = [
        ("login", "alice.smith"),
        ("name", "Alice"),
        ("surname", "Smith"),
        ("email", "alice@example.com"),
        ("password", "secret1"),
        ("passwordConfirmation", "secret1"),
    ]
    .into_iter()
    .collect();

    let span = tracing::info_span!("user_creation");
    let alice = async {
        info!("Submitting create form");
        client.submit(&UserDraft::new(), &signup).await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?
    .user;

    info!(user_id = %alice.id, "User created successfully");

    // An edit that breaks several rules at once
    let broken = SubmittedFields::new()
        .with(Field::Login, "alice_smith")
        .with(Field::Name, "Al")
        .with(Field::Email, "not-an-email")
        .with(Field::Active, "1");

    let span = tracing::info_span!("user_edit");
    let result = async {
        info!("Submitting invalid edit form");
        client.submit(&UserDraft::from(&alice), &broken).await
    }
    .instrument(span.clone())
    .await;

    match result {
        Ok(saved) => warn!(user_id = %saved.user.id, "Invalid edit was accepted"),
        Err(e) => match e.field_errors() {
            Some(errors) => {
                let rendered = serde_json::to_string(errors).map_err(|e| e.to_string())?;
                info!(errors = %rendered, "Edit rejected with field errors");
            }
            None => error!(error = %e, "Edit failed"),
        },
    }

    // A valid edit that deactivates the account
    let deactivate = SubmittedFields::new()
        .with(Field::Login, "alice.smith")
        .with(Field::Name, "Alice")
        .with(Field::Surname, "Smith");

    let edited = async {
        info!("Submitting edit form");
        client.submit(&UserDraft::from(&alice), &deactivate).await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?
    .user;

    info!(user_id = %edited.id, active = edited.active, "User updated successfully");

    // Shutdown system gracefully
    drop(client);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
