use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use projfiles::ClientError;
use projfiles::auth;
use projfiles::config::{
    ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SESSION_FILE, HttpTimeouts,
};
use projfiles::net::api::ApiClient;
use projfiles::page::{PageState, ProjectFilesPage};
use projfiles::project::{ProjectName, RelativePath};
use projfiles::session::SessionStore;

#[derive(Parser, Debug)]
#[command(name = "projfiles", about = "Browse and upload project files")]
struct Cli {
    #[arg(long, env = "PROJFILES_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Server-side directory that holds one folder per project
    #[arg(long, env = "PROJFILES_PROJECT_ROOT")]
    project_root: Option<String>,

    #[arg(long, env = "PROJFILES_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    #[arg(long, env = "PROJFILES_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "PROJFILES_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store the credential issued by the identity provider
    Login {
        #[arg(long, env = "PROJFILES_CREDENTIAL", hide_env_values = true, help = "Credential, or read one line from stdin")]
        credential: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// List a project's files
    List { project: String },
    /// Upload a local folder into a project, then list it again
    UploadFolder { project: String, folder: PathBuf },
    /// Upload a single file into a project's root
    Upload { project: String, file: PathBuf },
    /// Create an empty project
    Create { project: String },
    /// Delete a folder inside a project
    DeleteFolder { project: String, folder: String },
    /// Delete a project and everything in it
    Delete { project: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, ClientError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = ClientConfig::new(
        &cli.api_base_url,
        cli.project_root.as_deref(),
        cli.session_file,
        HttpTimeouts { request_secs: cli.request_timeout_secs, connect_secs: cli.connect_timeout_secs },
    )?;
    let store = SessionStore::new(config.session_file.clone());

    match cli.command {
        Command::Login { credential } => {
            let credential = match credential {
                Some(credential) => Some(credential),
                None => read_credential_line()?,
            };
            let fingerprint = auth::login(&store, credential.as_deref())?;
            println!("logged in ({fingerprint})");
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => {
            auth::logout(&store)?;
            println!("logged out");
            Ok(ExitCode::SUCCESS)
        }
        Command::List { project } => {
            let mut page = open_page(&config, &store, &project)?;
            page.load().await;
            print!("{}", page.view());
            Ok(page_exit_code(page.state()))
        }
        Command::UploadFolder { project, folder } => {
            let mut page = open_page(&config, &store, &project)?;
            let failed = matches!(page.load().await, PageState::Failed(_));
            if failed {
                print!("{}", page.view());
                return Ok(ExitCode::FAILURE);
            }
            page.upload_folder(&folder).await?;
            print!("{}", page.view());
            Ok(page_exit_code(page.state()))
        }
        Command::Upload { project, file } => {
            let project = ProjectName::parse(&project)?;
            let ack = api_client(&config, &store)?.upload_file(&project, &file).await?;
            print_json(&ack)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Create { project } => {
            let project = ProjectName::parse(&project)?;
            let ack = api_client(&config, &store)?.create_project(&project).await?;
            print_json(&ack)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::DeleteFolder { project, folder } => {
            let project = ProjectName::parse(&project)?;
            let folder = RelativePath::parse(&folder)?;
            let ack = api_client(&config, &store)?.delete_folder(&project, &folder).await?;
            print_json(&ack)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Delete { project } => {
            let project = ProjectName::parse(&project)?;
            let ack = api_client(&config, &store)?.delete_project(&project).await?;
            print_json(&ack)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn api_client(config: &ClientConfig, store: &SessionStore) -> Result<ApiClient, ClientError> {
    ApiClient::new(config, store.token()?)
}

fn open_page(
    config: &ClientConfig,
    store: &SessionStore,
    project: &str,
) -> Result<ProjectFilesPage<ApiClient>, ClientError> {
    let project = ProjectName::parse(project)?;
    let root = config.require_project_root()?;
    Ok(ProjectFilesPage::new(api_client(config, store)?, project, root))
}

fn page_exit_code(state: &PageState) -> ExitCode {
    match state {
        PageState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn read_credential_line() -> Result<Option<String>, ClientError> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ClientError::io("<stdin>", e))?;
    Ok(Some(line).filter(|l| !l.trim().is_empty()))
}

fn print_json(value: &Value) -> Result<(), ClientError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
