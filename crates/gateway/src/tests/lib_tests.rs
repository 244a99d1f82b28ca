use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use shared::protocol::{
    CommandAck, RotationCommand, ScanResponse, ShutterCommand, SunPositionResponse,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct RobotServerState {
    accept: bool,
    rotations: Arc<Mutex<Vec<u16>>>,
}

async fn handle_rotation(
    State(state): State<RobotServerState>,
    Json(command): Json<RotationCommand>,
) -> Json<CommandAck> {
    state.rotations.lock().await.push(command.angle);
    Json(CommandAck {
        accepted: state.accept,
        message: (!state.accept).then(|| "rotation motor locked out".to_string()),
    })
}

async fn handle_shutter(
    State(state): State<RobotServerState>,
    Json(_command): Json<ShutterCommand>,
) -> Json<CommandAck> {
    Json(CommandAck {
        accepted: state.accept,
        message: None,
    })
}

async fn handle_sun_position() -> Json<SunPositionResponse> {
    Json(SunPositionResponse { azimuth: 220 })
}

async fn handle_scan() -> Json<ScanResponse> {
    Json(ScanResponse {
        metrics: SoilMetrics {
            moisture: 44.0,
            ph: 6.8,
            nitrogen: 120.0,
            temperature: 21.0,
            light_level: 900.0,
        },
    })
}

async fn spawn_robot_server(accept: bool) -> (String, Arc<Mutex<Vec<u16>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let rotations = Arc::new(Mutex::new(Vec::new()));
    let state = RobotServerState {
        accept,
        rotations: Arc::clone(&rotations),
    };
    let app = Router::new()
        .route("/actuators/rotation", post(handle_rotation))
        .route("/actuators/shutter", post(handle_shutter))
        .route("/sensors/sun_position", get(handle_sun_position))
        .route("/probe/scan", post(handle_scan))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rotations)
}

#[tokio::test]
async fn accepted_command_reaches_the_controller() {
    let (server_url, rotations) = spawn_robot_server(true).await;
    let gateway = HttpActuatorGateway::new(server_url);

    gateway
        .set_rotation_angle(Angle::new(215))
        .await
        .expect("command accepted");

    assert_eq!(*rotations.lock().await, vec![215]);
}

#[tokio::test]
async fn refused_ack_maps_to_rejected() {
    let (server_url, _rotations) = spawn_robot_server(false).await;
    let gateway = HttpActuatorGateway::new(server_url);

    let err = gateway
        .set_rotation_angle(Angle::new(10))
        .await
        .expect_err("must be refused");
    assert_eq!(
        err,
        GatewayError::Rejected("rotation motor locked out".to_string())
    );

    let err = gateway
        .control_shutter(ShutterAction::Up)
        .await
        .expect_err("must be refused");
    assert_eq!(err, GatewayError::Rejected("command refused".to_string()));
}

#[tokio::test]
async fn sun_position_normalizes_into_an_angle() {
    let (server_url, _rotations) = spawn_robot_server(true).await;
    let gateway = HttpActuatorGateway::new(server_url);

    let azimuth = gateway.sun_position().await.expect("sun position");
    assert_eq!(azimuth, Angle::new(220));
}

#[tokio::test]
async fn probe_scan_returns_the_controller_snapshot() {
    let (server_url, _rotations) = spawn_robot_server(true).await;
    let gateway = HttpActuatorGateway::new(server_url);

    let metrics = gateway.perform_probe_scan().await.expect("scan");
    assert_eq!(metrics.moisture, 44.0);
    assert_eq!(metrics.ph, 6.8);
    assert_eq!(metrics.light_level, 900.0);
}

#[tokio::test]
async fn unreachable_controller_surfaces_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    // Nothing listens on this port; the bind/drop reserves a closed one.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let gateway = HttpActuatorGateway::new(format!("http://{addr}"));

    let err = gateway
        .set_platform_height(40)
        .await
        .expect_err("must fail");
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn missing_gateway_reports_unavailable() {
    let gateway = MissingActuatorGateway;
    assert_eq!(
        gateway.set_platform_height(10).await,
        Err(GatewayError::Unavailable)
    );
    assert_eq!(
        gateway.perform_probe_scan().await,
        Err(GatewayError::Unavailable)
    );
}

#[tokio::test]
async fn simulated_scan_stays_in_sensor_range() {
    let gateway = SimulatedActuatorGateway::instant();
    for _ in 0..16 {
        let metrics = gateway.perform_probe_scan().await.expect("scan");
        assert!((0.0..=100.0).contains(&metrics.moisture));
        assert!((0.0..=14.0).contains(&metrics.ph));
        assert!(metrics.nitrogen >= 0.0);
        assert!((-10.0..=50.0).contains(&metrics.temperature));
        assert!(metrics.light_level >= 0.0);
    }
}

#[tokio::test]
async fn simulated_commands_acknowledge() {
    let gateway = SimulatedActuatorGateway::instant();
    gateway.set_platform_height(80).await.expect("height");
    gateway
        .control_shutter(ShutterAction::Down)
        .await
        .expect("shutter");
    gateway
        .trigger_watering(PlantType::SunLoving)
        .await
        .expect("watering");
    assert_eq!(gateway.sun_position().await, Ok(Angle::new(135)));
}
