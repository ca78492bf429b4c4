use uuid::Uuid;

use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::UserRole;
use crate::repositories;

/// Creates the configured first admin, or repairs its role and password if
/// the account already exists under another role or an old password.
pub(crate) async fn ensure_first_admin(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    if admin.first_admin_password.is_empty() {
        tracing::warn!("FIRST_ADMIN_PASSWORD not configured; skipping admin bootstrap");
        return Ok(());
    }

    let email = admin.first_admin_email.as_str();
    let existing = repositories::users::find_by_email(state.db(), email).await?;

    if let Some(user) = existing {
        let verified = security::verify_password(&admin.first_admin_password, &user.hashed_password)
            .unwrap_or(false);

        if verified && user.role == UserRole::Admin {
            tracing::info!(email, "First admin already up to date");
            return Ok(());
        }

        let hashed_password = if verified {
            user.hashed_password.clone()
        } else {
            security::hash_password(&admin.first_admin_password)?
        };

        repositories::users::repair_admin(state.db(), &user.id, &hashed_password).await?;
        tracing::info!(email, user_id = %user.id, "Repaired first admin account");
        return Ok(());
    }

    let hashed_password = security::hash_password(&admin.first_admin_password)?;
    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            name: &admin.first_admin_name,
            email,
            hashed_password: &hashed_password,
            role: UserRole::Admin,
            email_verified: true,
            auth_provider: "local",
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    tracing::info!(email, user_id = %user.id, "Created first admin account");
    Ok(())
}
