use lambda_runtime::{service_fn, Error, LambdaEvent};
use prewarm_core::config::PrewarmConfig;
use prewarm_core::contract::PipelineOutcome;
use prewarm_lambda::adapters::postgres::PgDataPlane;
use prewarm_lambda::adapters::rds::RdsControlPlane;
use prewarm_lambda::adapters::secrets_manager::SecretsManagerStore;
use prewarm_lambda::handlers::instance_created::InstanceCreatedHandler;
use prewarm_lambda::telemetry::init_tracing;
use serde_json::Value;
use tracing::Instrument;

struct RuntimeDependencies {
    config: PrewarmConfig,
    control_plane: RdsControlPlane,
    secret_store: SecretsManagerStore,
    data_plane: PgDataPlane,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<PipelineOutcome, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    let handler = InstanceCreatedHandler::new(
        &deps.config,
        &deps.control_plane,
        &deps.secret_store,
        &deps.data_plane,
    );

    let outcome = handler.handle_payload(event.payload).instrument(span).await?;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing()?;

    let config = PrewarmConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config,
        control_plane: RdsControlPlane::new(aws_sdk_rds::Client::new(&aws_config)),
        secret_store: SecretsManagerStore::new(aws_sdk_secretsmanager::Client::new(&aws_config)),
        data_plane: PgDataPlane,
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
