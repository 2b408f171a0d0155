use std::{process, sync::Arc};

use scrivano::{
    application::{
        error::AppError,
        posts::{PostAuthor, PostService},
        repos::{PostsRepo, PostsWriteRepo, UploadsRepo},
        uploads::UploadService,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState, DashboardState, RouterState},
        telemetry,
        uploads::UploadStorage,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrations(args) => run_migrations(settings, args).await,
    }
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let posts_write_repo: Arc<dyn PostsWriteRepo> = repositories.clone();
    let uploads_repo: Arc<dyn UploadsRepo> = repositories.clone();

    // A stable identity per configured email so re-deployments keep authorship.
    let default_author = PostAuthor {
        id: Uuid::new_v5(&Uuid::NAMESPACE_URL, settings.author.email.as_bytes()),
        name: settings.author.name.clone(),
        email: settings.author.email.clone(),
    };

    let post_service = Arc::new(PostService::new(
        posts_repo,
        posts_write_repo,
        default_author,
    ));

    let upload_storage = Arc::new(
        UploadStorage::new(settings.uploads.directory.clone())
            .map_err(|err| AppError::from(InfraError::Io(err)))?,
    );
    let upload_service = Arc::new(UploadService::new(
        upload_storage,
        uploads_repo,
        settings.server.public_url.clone(),
    ));

    let dashboard = DashboardState::new(post_service.clone(), &settings.editor)
        .map_err(|err| AppError::unexpected(format!("editor bootstrap failed: {err}")))?;
    let api = ApiState::new(
        post_service,
        upload_service,
        repositories,
        settings.uploads.max_request_bytes,
    );

    let router = http::build_router(RouterState { dashboard, api });

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "scrivano::server",
        addr = %settings.server.addr,
        public_url = %settings.server.public_url,
        "dashboard listening"
    );

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn run_migrations(
    settings: config::Settings,
    args: config::MigrationsArgs,
) -> Result<(), AppError> {
    match args.command {
        config::MigrationsCommand::Run(_) => {
            let database_url = settings
                .database
                .url
                .as_ref()
                .ok_or_else(|| InfraError::configuration("database url is not configured"))
                .map_err(AppError::from)?;

            let pool =
                PostgresRepositories::connect(database_url, settings.database.max_connections)
                    .await
                    .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

            PostgresRepositories::run_migrations(&pool)
                .await
                .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

            info!(target = "scrivano::migrations", "migrations applied");
            Ok(())
        }
    }
}
