//! Login and end-to-end encryption setup.
//!
//! On first start the bot logs in with its password, bootstraps cross signing
//! and enables recovery with the passphrase. On later starts it restores the
//! saved login and imports its secrets from secret storage. Either way the
//! device must end up verified.

use anyhow::{anyhow, bail};
use log::{debug, error, info};
use matrix_sdk::{
    Client,
    encryption::{
        BackupDownloadStrategy, EncryptionSettings,
        recovery::{RecoveryError, RecoveryState},
    },
    ruma::{OwnedUserId, api::client::uiaa},
};

use crate::matrix::{UserCredentials, session::SessionStore};

/// Builds a client for the bot account, logged in and with encryption ready.
pub async fn setup_client(
    credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    info!("setting up matrix client for {}", credentials.user_id);

    let client = if store.has_session() {
        restore_login(credentials, store).await?
    } else {
        first_login(credentials, store).await?
    };

    check_encryption(&client).await?;
    info!("matrix client ready");
    Ok(client)
}

/// Builds an SDK client backed by the encrypted sqlite store.
///
/// # Arguments
///
/// * `credentials` - Bot account, its passphrase also encrypts the store
/// * `store` - Session store giving the sqlite location
///
/// # Returns
///
/// The client and the parsed user ID of the bot.
async fn build_client(
    credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<(Client, OwnedUserId), anyhow::Error> {
    let user_id: OwnedUserId = credentials.user_id.as_str().try_into()?;

    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(store.store_path(), Some(&credentials.passphrase))
        .with_encryption_settings(EncryptionSettings {
            auto_enable_cross_signing: true,
            backup_download_strategy: BackupDownloadStrategy::default(),
            auto_enable_backups: true,
        })
        .build()
        .await?;

    Ok((client, user_id))
}

/// Logs in with the password and sets up encryption from scratch.
///
/// Cross signing is bootstrapped, recovery is enabled with the passphrase and
/// the login is saved so later starts can restore it.
///
/// # Errors
///
/// Returns an error if any step fails. Nothing is saved in that case.
async fn first_login(
    credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    let (client, user_id) = build_client(credentials, store).await?;

    client
        .matrix_auth()
        .login_username(user_id, &credentials.password)
        .initial_device_display_name("starguide bot")
        .send()
        .await?;
    debug!("logged in");

    setup_cross_signing(&client, credentials).await?;
    setup_recovery(&client, &credentials.passphrase).await?;

    client
        .encryption()
        .recovery()
        .recover(&credentials.passphrase)
        .await?;
    debug!("secrets recovered");

    let user_session = client
        .matrix_auth()
        .session()
        .ok_or_else(|| anyhow!("no session after login"))?;
    store.save_user_session(&user_session).await?;

    Ok(client)
}

/// Restores the saved login and imports the secrets from secret storage.
///
/// # Errors
///
/// Returns an error if no login is saved, or if the passphrase does not open
/// the secret store.
async fn restore_login(
    credentials: &UserCredentials,
    store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    info!("restoring matrix session from disk");

    let user_session = store
        .user_session()
        .ok_or_else(|| anyhow!("no saved session to restore"))?
        .clone();
    let (client, _) = build_client(credentials, store).await?;
    client.restore_session(user_session).await?;

    client
        .encryption()
        .secret_storage()
        .open_secret_store(&credentials.passphrase)
        .await?
        .import_secrets()
        .await?;
    debug!("secrets imported");

    Ok(client)
}

/// Bootstraps cross signing if the account has none yet.
///
/// The homeserver may require user-interactive auth for the upload; the
/// password is then sent with the session it returned.
///
/// # Errors
///
/// Returns an error if the bootstrap fails for another reason than auth, or
/// if the password is refused.
async fn setup_cross_signing(
    client: &Client,
    credentials: &UserCredentials,
) -> Result<(), anyhow::Error> {
    let Err(e) = client
        .encryption()
        .bootstrap_cross_signing_if_needed(None)
        .await
    else {
        debug!("cross signing already set up");
        return Ok(());
    };

    // The homeserver asks for the password before uploading the keys
    let Some(response) = e.as_uiaa_response() else {
        bail!("failed to bootstrap cross signing: {:?}", e);
    };
    let mut password = uiaa::Password::new(
        uiaa::UserIdentifier::UserIdOrLocalpart(credentials.user_id.clone()),
        credentials.password.clone(),
    );
    password.session = response.session.clone();

    client
        .encryption()
        .bootstrap_cross_signing(Some(uiaa::AuthData::Password(password)))
        .await?;

    debug!("cross signing set up");
    Ok(())
}

/// Enables key backup and secret storage protected by `passphrase`.
///
/// An existing backup on the server is not an error.
async fn setup_recovery(client: &Client, passphrase: &str) -> Result<(), anyhow::Error> {
    match client
        .encryption()
        .recovery()
        .enable()
        .with_passphrase(passphrase)
        .await
    {
        Ok(_) => debug!("recovery enabled"),
        Err(RecoveryError::BackupExistsOnServer) => debug!("recovery already enabled"),
        Err(e) => bail!("failed to enable recovery: {:?}", e),
    }

    Ok(())
}

/// Checks that recovery is enabled and that the bot device is verified.
///
/// # Errors
///
/// Returns an error describing the first check that does not hold.
async fn check_encryption(client: &Client) -> Result<(), anyhow::Error> {
    if client.encryption().recovery().state() != RecoveryState::Enabled {
        error!("recovery is not enabled");
        bail!("recovery is not enabled");
    }

    let verified = client
        .encryption()
        .get_own_device()
        .await?
        .is_some_and(|device| device.is_verified());
    if !verified {
        error!("device is not verified");
        bail!("device is not verified");
    }

    Ok(())
}
