//! Subcommand handlers. Each one is a view of the showcase front end.

use showcase_api_client::{ApiClient, Document, SessionClient};
use showcase_core::catalog::FilterField;
use showcase_core::models::{Adjudication, Registration, Submission};
use showcase_core::session::{FileStore, Route, Session};

use crate::cli::{Commands, GalleryArgs, RegisterArgs, SubmitArgs};
use crate::config::CliConfig;
use crate::{Error, Result, render};

type Client = SessionClient<FileStore>;

pub fn connect(config: &CliConfig) -> Result<Client> {
    let api = ApiClient::new(&config.client)?;
    let store = FileStore::in_dir(&config.data_dir);
    log::debug!("session file: {}", store.path().display());
    Ok(SessionClient::new(api, Session::new(store, config.client.decoder())))
}

pub async fn execute(client: &Client, command: Commands) -> Result<()> {
    match command {
        Commands::Version => {
            println!(
                "{} {} (core {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                showcase_core::version()
            );
        }
        Commands::Nav => {
            let session = client.session();
            let name = session.display_name();
            print!("{}", render::nav(&session.nav_links(), name.as_deref())?);
        }
        Commands::Whoami => {
            let session = client.session();
            let identity = session.identity();
            let name = session.display_name();
            println!("{}", render::whoami(identity.as_ref(), name.as_deref()));
        }
        Commands::Login { email, password } => {
            let identity = client.login(&email, &password).await?;
            let name = client
                .session()
                .display_name()
                .unwrap_or_else(|| identity.username.clone());
            println!("Welcome, {name}!");
            println!("Next: {}", Route::landing_for(identity.role));
        }
        Commands::Register(args) => register(client, args).await?,
        Commands::Logout => {
            client.logout()?;
            println!("Signed out.");
        }
        Commands::Gallery(args) => gallery(client, args).await?,
        Commands::Show { id } => {
            let record = client.project(&id).await?;
            let document = client.api().document_url(&record);
            let signed_in = client.session().identity().is_some();
            print!("{}", render::details(&record, document.as_ref(), signed_in)?);
        }
        Commands::Pending => {
            let records = client.pending().await?;
            print!("{}", render::pending(&records)?);
        }
        Commands::Approve { id, comments } => {
            let comments = comments.filter(|c| !c.trim().is_empty());
            client.adjudicate(&id, &Adjudication::approve(comments)).await?;
            println!("Project {id} approved.");
        }
        Commands::Reject { id, comments } => {
            if comments.trim().is_empty() {
                return Err(Error::Custom(
                    "Please tell the student why the project was rejected (--comments).".into(),
                ));
            }
            client.adjudicate(&id, &Adjudication::reject(comments)).await?;
            println!("Project {id} rejected.");
        }
        Commands::Submit(args) => submit(client, args).await?,
        Commands::Dashboard => {
            let stats = client.dashboard().await?;
            print!("{}", render::dashboard(&stats)?);
        }
    }
    Ok(())
}

async fn register(client: &Client, args: RegisterArgs) -> Result<()> {
    let registration = Registration {
        username: args.username,
        email: args.email,
        password: args.password,
        role: args.role,
        faculty: args.faculty,
    };
    client.register(&registration).await?;
    println!("Account created. Sign in with: showcase login --email {}", registration.email);
    Ok(())
}

async fn gallery(client: &Client, args: GalleryArgs) -> Result<()> {
    let mut catalog = client.gallery().await?;
    let criteria = [
        (FilterField::Faculty, args.faculty),
        (FilterField::Category, args.category),
        (FilterField::Year, args.year),
        (FilterField::Technology, args.tech),
    ];
    for (field, value) in criteria {
        if let Some(value) = value {
            catalog.set_criterion(field, &value);
        }
    }
    print!("{}", render::gallery(&catalog, args.facets)?);
    Ok(())
}

async fn submit(client: &Client, args: SubmitArgs) -> Result<()> {
    // Refuse before touching the document, as the form would not render.
    let required = Route::Submit.required_roles().unwrap_or(&[]);
    client.session().require(required)?;

    let document = Document::from_path(&args.document)?;
    let submission = Submission {
        title: args.title,
        description: args.description,
        category: args.category,
        technologies: args.technologies,
        year: args.year,
        faculty: args.faculty,
    };
    client.submit(&submission, document).await?;
    println!("Project submitted for review.");
    Ok(())
}
