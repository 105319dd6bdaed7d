use dotenvy::dotenv;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tutorium::router::init_router;
use tutorium::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "create-superadmin" {
        handle_create_superadmin(args).await;
        return;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state().await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("🚀 Server running on http://localhost:3000");
    println!("📚 Swagger UI available at http://localhost:3000/swagger-ui");
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_superadmin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!(
            "Usage: {} create-superadmin <full_name> <email> <password>",
            args[0]
        );
        std::process::exit(1);
    }

    let full_name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    tutorium::db::run_migrations(&pool).await;

    match tutorium::cli::create_superadmin(&pool, full_name, email, password).await {
        Ok(_) => {
            println!("✅ Superadmin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", full_name);
        }
        Err(e) => {
            eprintln!("❌ Error creating superadmin: {}", e.error);
            std::process::exit(1);
        }
    }
}
