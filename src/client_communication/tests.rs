use super::{
    ClientEndpoint, Downstream, DownstreamContent, EndpointError, FlightMode, Ping, PoseSample, SkipReason,
    Upstream, UpstreamContent, WireLandmark,
};
use crate::pose::Landmark;
use crate::session::SessionRegistry;
use chrono::TimeDelta;
use prost::Message;
use std::{io::ErrorKind, sync::Arc, time::Duration};
use tokio::io::DuplexStream;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

fn wire(landmark: Landmark, x: f32, y: f32) -> WireLandmark {
    WireLandmark { index: landmark.mediapipe_index(), x, y, visibility: Some(0.9) }
}

fn t_pose_sample() -> PoseSample {
    PoseSample {
        detected: true,
        landmarks: vec![
            wire(Landmark::LeftShoulder, 0.4, 0.4),
            wire(Landmark::RightShoulder, 0.6, 0.4),
            wire(Landmark::LeftElbow, 0.3, 0.4),
            wire(Landmark::RightElbow, 0.7, 0.4),
            wire(Landmark::LeftWrist, 0.2, 0.4),
            wire(Landmark::RightWrist, 0.8, 0.4),
            wire(Landmark::LeftHip, 0.42, 0.7),
            wire(Landmark::RightHip, 0.58, 0.7),
            wire(Landmark::Nose, 0.5, 0.3),
        ],
        error: None,
    }
}

fn upstream(content: UpstreamContent) -> Vec<u8> { Upstream { content: Some(content) }.encode_to_vec() }

async fn request<S>(client: &mut S, payload: &[u8]) -> DownstreamContent
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    ClientEndpoint::write_frame(client, payload).await.unwrap();
    let buffer = ClientEndpoint::read_frame(client).await.unwrap();
    Downstream::decode(buffer.as_slice()).unwrap().content.unwrap()
}

async fn serve_duplex(
    min_frame_interval: TimeDelta,
) -> (DuplexStream, tokio::task::JoinHandle<Result<(), EndpointError>>) {
    let registry = Arc::new(SessionRegistry::new(min_frame_interval));
    let id = registry.create().await;
    let (client, mut server) = tokio::io::duplex(64 * 1024);
    let handle = tokio::spawn(async move { ClientEndpoint::serve(&registry, id, &mut server).await });
    (client, handle)
}

#[test]
fn test_pose_sample_conversion() {
    let mut sample = t_pose_sample();
    sample.landmarks.push(WireLandmark { index: 27, x: 0.5, y: 0.9, visibility: None });
    sample.landmarks[0].visibility = Some(0.1);

    let frame = sample.to_pose_frame().unwrap();
    assert_eq!(frame.get(Landmark::LeftShoulder), None);
    assert!(frame.get(Landmark::RightShoulder).is_some());
    assert_eq!(frame.present().count(), Landmark::COUNT - 1);

    sample.detected = false;
    assert_eq!(sample.to_pose_frame(), None);
}

#[test]
fn test_pose_sample_drops_corrupt_coordinates() {
    let mut sample = t_pose_sample();
    sample.landmarks[4].x = f32::NAN;
    sample.landmarks[5].y = f32::INFINITY;
    sample.landmarks[8].y = -0.2;
    sample.landmarks[2].x = 1.3;

    let frame = sample.to_pose_frame().unwrap();
    for landmark in [Landmark::LeftWrist, Landmark::RightWrist, Landmark::Nose, Landmark::LeftElbow] {
        assert_eq!(frame.get(landmark), None, "{landmark}");
    }
    assert_eq!(frame.present().count(), Landmark::COUNT - 4);
}

#[tokio::test]
async fn test_ping_pong() {
    let (mut client, _server) = serve_duplex(TimeDelta::zero()).await;
    let reply = request(&mut client, &upstream(UpstreamContent::Ping(Ping { echo: Some("hi".into()) }))).await;
    match reply {
        DownstreamContent::Pong(pong) => assert_eq!(pong.echo.as_deref(), Some("hi")),
        other => panic!("unexpected reply {other:?}"),
    }
}

#[tokio::test]
async fn test_pose_sample_yields_frame_result() {
    let (mut client, _server) = serve_duplex(TimeDelta::zero()).await;
    let reply = request(&mut client, &upstream(UpstreamContent::PoseSample(t_pose_sample()))).await;
    let DownstreamContent::FrameResult(result) = reply else { panic!("expected a frame result") };

    assert_eq!(result.frame, 1);
    assert_eq!(result.command.map(|c| c.state), Some(FlightMode::Glide as i32));
    let bird = result.bird.unwrap();
    assert_eq!(bird.state, FlightMode::Glide as i32);
    assert!(bird.y > 10.0);
    assert_eq!(result.keypoints.len(), Landmark::COUNT);
    assert!(!result.entities.is_empty());

    let nobody = PoseSample { detected: false, landmarks: Vec::new(), error: None };
    let reply = request(&mut client, &upstream(UpstreamContent::PoseSample(nobody))).await;
    let DownstreamContent::FrameResult(result) = reply else { panic!("expected a frame result") };
    assert_eq!(result.frame, 2);
    assert_eq!(result.command.map(|c| c.state), Some(FlightMode::None as i32));
    assert!(result.keypoints.is_empty());
}

#[tokio::test]
async fn test_skipped_frames() {
    let (mut client, _server) = serve_duplex(TimeDelta::seconds(10)).await;

    let reply = request(&mut client, &[0xff, 0xff, 0xff]).await;
    assert!(matches!(reply, DownstreamContent::FrameSkipped(s) if s.reason == SkipReason::Undecodable as i32));

    let failed = PoseSample { error: Some("camera unavailable".into()), ..t_pose_sample() };
    let reply = request(&mut client, &upstream(UpstreamContent::PoseSample(failed))).await;
    assert!(matches!(reply, DownstreamContent::FrameSkipped(s) if s.reason == SkipReason::PoseUnavailable as i32));

    let reply = request(&mut client, &upstream(UpstreamContent::PoseSample(t_pose_sample()))).await;
    assert!(matches!(reply, DownstreamContent::FrameResult(_)));

    // well within the ten second interval
    let reply = request(&mut client, &upstream(UpstreamContent::PoseSample(t_pose_sample()))).await;
    assert!(matches!(reply, DownstreamContent::FrameSkipped(s) if s.reason == SkipReason::Throttled as i32));
}

#[tokio::test]
async fn test_oversized_frame_closes_stream() {
    let (mut client, server) = serve_duplex(TimeDelta::zero()).await;
    tokio::io::AsyncWriteExt::write_u32(&mut client, ClientEndpoint::MAX_FRAME_LEN + 1).await.unwrap();
    let result = server.await.unwrap();
    assert!(matches!(result, Err(EndpointError::FrameTooLarge(len)) if len == ClientEndpoint::MAX_FRAME_LEN + 1));
}

#[tokio::test]
async fn test_client_hangup_ends_serve() {
    let (client, server) = serve_duplex(TimeDelta::zero()).await;
    drop(client);
    let result = server.await.unwrap();
    assert!(matches!(result, Err(EndpointError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof));
}

#[tokio::test]
async fn test_tcp_session_per_connection() {
    let registry = Arc::new(SessionRegistry::new(TimeDelta::zero()));
    let cancel = CancellationToken::new();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let endpoint = ClientEndpoint::new(Arc::clone(&registry), cancel.clone());
    let running = tokio::spawn(endpoint.run(listener));

    let mut client = TcpStream::connect(addr).await.unwrap();
    let reply = request(&mut client, &upstream(UpstreamContent::Ping(Ping { echo: None }))).await;
    assert!(matches!(reply, DownstreamContent::Pong(_)));
    assert_eq!(registry.len().await, 1);

    drop(client);
    for _ in 0..100 {
        if registry.is_empty().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(registry.is_empty().await);

    cancel.cancel();
    assert!(matches!(running.await, Ok(Ok(()))));
}
