//! The user-facing flows: each one issues requests through the shared
//! `ApiClient` and reports the outcome.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use revoo_core::models::{HabitForm, ProgressForm, WeeklyGoalForm};
use revoo_core::{ApiClient, ApiError, Config};

use crate::cli::{Command, GoalCommand, HabitCommand, ProgressArgs};
use crate::{prompt, render};

/// Output options shared by every flow
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn list<T: Serialize>(&self, items: &[T], text: impl FnOnce(&[T]) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(items)?);
        } else {
            println!("{}", text(items));
        }
        Ok(())
    }
}

pub async fn run(command: Command, client: &ApiClient, config: &Config, out: Output) -> Result<()> {
    match command {
        Command::Login { email, password } => login(client, email, password).await,
        Command::Logout => {
            client.logout().await?;
            println!("Logged out.");
            Ok(())
        }
        Command::Status => status(client, config).await,
        Command::Habits(cmd) => habits(client, cmd, out).await,
        Command::Goals(cmd) => goals(client, cmd, out).await,
        Command::Progress(args) => progress(client, args).await,
    }
}

async fn login(client: &ApiClient, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt::line("Email: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    // Resolves only once the token is persisted
    client.login(&email, &password).await?;
    println!("Logged in as {}.", email.trim());
    Ok(())
}

async fn status(client: &ApiClient, config: &Config) -> Result<()> {
    println!("Backend:       {}", client.base_url());
    println!("Token backend: {:?}", config.token_backend);
    let state = if client.is_authenticated().await? {
        "logged in"
    } else {
        "not logged in"
    };
    println!("Session:       {}", state);
    Ok(())
}

async fn habits(client: &ApiClient, cmd: HabitCommand, out: Output) -> Result<()> {
    match cmd {
        HabitCommand::List => {
            let habits = client.list_habits().await?;
            out.list(&habits, render::habit_list)
        }
        HabitCommand::Show { id } => {
            let habit = client.get_habit(id).await?;
            if out.json {
                println!("{}", serde_json::to_string_pretty(&habit)?);
            } else {
                println!("{}", render::habit_detail(&habit));
            }
            Ok(())
        }
        HabitCommand::Add {
            titulo,
            descricao,
            pontos,
        } => {
            let input = HabitForm {
                titulo,
                descricao,
                pontos_base: pontos,
            }
            .validate()
            .map_err(ApiError::from)?;
            client.create_habit(&input).await?;
            println!("Habit '{}' created.", input.titulo);
            Ok(())
        }
        HabitCommand::Edit {
            id,
            titulo,
            descricao,
            pontos,
        } => {
            let current = client.get_habit(id).await?;
            let mut form = HabitForm::from_habit(&current);
            if let Some(titulo) = titulo {
                form.titulo = titulo;
            }
            if let Some(descricao) = descricao {
                form.descricao = descricao;
            }
            if let Some(pontos) = pontos {
                form.pontos_base = pontos;
            }
            let input = form.validate().map_err(ApiError::from)?;
            client.update_habit(id, &input).await?;
            println!("Habit #{} updated.", id);
            Ok(())
        }
        HabitCommand::Remove { id, yes } => {
            if !yes && !prompt::confirm(&format!("Delete habit #{}?", id))? {
                println!("Cancelled.");
                return Ok(());
            }
            client.delete_habit(id).await?;
            info!(id, "Habit deleted");
            println!("Habit #{} deleted.", id);
            Ok(())
        }
    }
}

async fn goals(client: &ApiClient, cmd: GoalCommand, out: Output) -> Result<()> {
    match cmd {
        GoalCommand::List => {
            let goals = client.list_weekly_goals().await?;
            out.list(&goals, render::goal_list)
        }
        GoalCommand::Add {
            colaborador,
            habito,
            inicio,
            fim,
            quantidade,
        } => {
            let goal = WeeklyGoalForm {
                id_colaborador: colaborador,
                id_habito: habito,
                semana_inicio: inicio,
                semana_fim: fim,
                quantidade_meta: quantidade,
            }
            .validate()
            .map_err(ApiError::from)?;
            client.create_weekly_goal(&goal).await?;
            println!("Weekly goal created.");
            Ok(())
        }
    }
}

async fn progress(client: &ApiClient, args: ProgressArgs) -> Result<()> {
    let meta_id = match args.meta {
        Some(id) => Some(id),
        None => pick_goal(client).await?,
    };
    let Some(meta_id) = meta_id else {
        return Ok(());
    };

    let record = ProgressForm {
        meta_id: Some(meta_id),
        data_registro: args.data,
        quantidade_progresso: args.quantidade,
        observacao: args.observacao,
    }
    .validate()
    .map_err(ApiError::from)?;
    client.record_progress(&record).await?;
    println!("Progress recorded.");
    Ok(())
}

/// List goals and let the user pick one. `None` when there is nothing to pick.
async fn pick_goal(client: &ApiClient) -> Result<Option<i64>> {
    let goals = client.list_weekly_goals().await?;
    if goals.is_empty() {
        println!("No weekly goals found. Create one first with `revoo goals add`.");
        return Ok(None);
    }

    for (i, goal) in goals.iter().enumerate() {
        println!("{:>3}. {}", i + 1, goal.picker_label());
    }
    match prompt::choose("Goal number: ", goals.len())? {
        Some(index) => Ok(Some(goals[index].id)),
        None => Err(ApiError::from(revoo_core::ValidationError::new(
            "idMetaSemanal",
            "select a weekly goal",
        ))
        .into()),
    }
}

/// Map an error to the message shown to the user.
pub fn describe_error(err: &anyhow::Error, base_url: Option<&str>) -> String {
    let Some(api_err) = err.downcast_ref::<ApiError>() else {
        return format!("{:#}", err);
    };

    match api_err {
        ApiError::Validation(v) => format!("Invalid {}: {}.", v.field, v.message),
        ApiError::Storage(e) => format!("Could not access the saved session: {}.", e),
        ApiError::Network(_) => match base_url {
            Some(url) => format!("Could not reach the server at {}. Check your connection and the API URL.", url),
            None => "Could not reach the server. Check your connection and the API URL.".to_string(),
        },
        ApiError::Http { .. } if api_err.is_unauthorized() => {
            "Not logged in or the session has expired. Run `revoo login`.".to_string()
        }
        ApiError::Http { status, .. } if status.as_u16() == 404 => "Not found.".to_string(),
        ApiError::Http { status, .. } => format!("The server rejected the request ({}).", status),
        ApiError::MissingToken => "Login failed: the server did not return a token.".to_string(),
        ApiError::InvalidResponse(_) => "Unexpected response from the server.".to_string(),
        ApiError::Config(msg) => format!("Configuration error: {}.", msg),
    }
}
