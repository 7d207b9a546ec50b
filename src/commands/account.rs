use crate::*;

/// Handles the session/account command tree. Returns false when the
/// command belongs to the catalog handler instead.
pub fn handle_account_commands(cli: &Cli, api: &Api) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Login { username, password } => {
            let mut session = AuthSession::anonymous();
            if !session.login(api, username, password) {
                return Err(MarketError::CredentialsRejected.into());
            }
            let status = SessionStatus {
                authenticated: true,
                user: session.user().map(|u| u.to_string()),
            };
            print_one(cli.json, status, |s| {
                format!("signed in as {}", s.user.as_deref().unwrap_or("?"))
            })?;
        }
        Commands::Register { username, password } => {
            let session = AuthSession::anonymous();
            if !session.register(api, username, password) {
                return Err(MarketError::RegistrationRejected.into());
            }
            print_one(cli.json, "registered", |_| {
                format!("registered {}; sign in with `quadmart login`", username)
            })?;
        }
        Commands::Logout => {
            let mut session = AuthSession::anonymous();
            session.logout();
            print_one(cli.json, "signed-out", |_| "signed out".to_string())?;
        }
        Commands::Whoami => {
            let session = AuthSession::load(api);
            let Some(user) = session.user() else {
                return Err(MarketError::AuthRequired.into());
            };
            let status = SessionStatus {
                authenticated: true,
                user: Some(user.to_string()),
            };
            print_one(cli.json, status, |s| {
                s.user.as_deref().unwrap_or("?").to_string()
            })?;
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Show => {
                let session = AuthSession::load(api);
                let Some(token) = session.token() else {
                    return Err(MarketError::AuthRequired.into());
                };
                let profile = api.profile(token)?;
                print_one(cli.json, profile, render_profile)?;
            }
            ProfileCommands::Update {
                username,
                email,
                full_name,
                bio,
                location,
            } => {
                let mut session = AuthSession::load(api);
                let Some(token) = session.token().map(|t| t.to_string()) else {
                    return Err(MarketError::AuthRequired.into());
                };
                let mut profile = api.profile(&token)?;
                if let Some(v) = username {
                    profile.username = v.clone();
                }
                if let Some(v) = email {
                    profile.email = v.clone();
                }
                if let Some(v) = full_name {
                    profile.full_name = v.clone();
                }
                if let Some(v) = bio {
                    profile.bio = v.clone();
                }
                if let Some(v) = location {
                    profile.location = v.clone();
                }
                let updated = api.update_profile(&token, &profile)?;
                audit(
                    "profile_update",
                    serde_json::json!({"username": updated.username}),
                );
                session.refresh_user(api);
                print_one(cli.json, updated, render_profile)?;
            }
        },
        _ => return Ok(false),
    }

    Ok(true)
}

fn render_profile(p: &Profile) -> String {
    let mut lines = vec![format!("username: {}", p.username)];
    if !p.email.is_empty() {
        lines.push(format!("email: {}", p.email));
    }
    if !p.full_name.is_empty() {
        lines.push(format!("name: {}", p.full_name));
    }
    if !p.bio.is_empty() {
        lines.push(format!("bio: {}", p.bio));
    }
    if !p.location.is_empty() {
        lines.push(format!("location: {}", p.location));
    }
    if !p.created_at.is_empty() {
        lines.push(format!("joined: {}", p.created_at));
    }
    lines.join("\n")
}
