use super::client_messages::{
    Downstream, DownstreamContent, FrameResult, FrameSkipped, Pong, SkipReason, Upstream, UpstreamContent,
};
use crate::session::{SessionError, SessionId, SessionRegistry};
use crate::{event, info, warn};
use prost::Message;
use std::{io::ErrorKind, sync::Arc};
use strum_macros::Display;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Display)]
pub enum EndpointError {
    Io(std::io::Error),
    FrameTooLarge(u32),
    Session(SessionError),
}

impl std::error::Error for EndpointError {}

impl From<std::io::Error> for EndpointError {
    fn from(e: std::io::Error) -> Self { EndpointError::Io(e) }
}

impl From<SessionError> for EndpointError {
    fn from(e: SessionError) -> Self { EndpointError::Session(e) }
}

impl EndpointError {
    /// The peer went away; not worth a warning.
    fn is_disconnect(&self) -> bool {
        matches!(
            self,
            EndpointError::Io(e) if matches!(
                e.kind(),
                ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
            )
        )
    }
}

/// TCP endpoint speaking `u32`-length-prefixed protobuf frames. Every
/// connection gets its own session, destroyed when the connection closes.
pub struct ClientEndpoint {
    registry: Arc<SessionRegistry>,
    cancel: CancellationToken,
}

impl ClientEndpoint {
    /// Upper bound for a single upstream frame in bytes.
    pub const MAX_FRAME_LEN: u32 = 1 << 20;

    pub fn new(registry: Arc<SessionRegistry>, cancel: CancellationToken) -> Self { Self { registry, cancel } }

    /// Accepts connections on `listener` until the cancellation token fires.
    pub async fn run(self, listener: TcpListener) -> Result<(), EndpointError> {
        info!("Client endpoint listening on {}", listener.local_addr()?);
        loop {
            let accept = tokio::select! {
                accept = listener.accept() => accept,
                () = self.cancel.cancelled() => break,
            };
            match accept {
                Ok((socket, peer)) => {
                    info!("Client connected from {peer}");
                    let registry = Arc::clone(&self.registry);
                    let cancel = self.cancel.child_token();
                    tokio::spawn(Self::handle_connection(registry, socket, cancel));
                }
                Err(e) => warn!("Failed to accept client connection: {e}"),
            }
        }
        info!("Client endpoint stopped");
        Ok(())
    }

    async fn handle_connection(registry: Arc<SessionRegistry>, mut socket: TcpStream, cancel: CancellationToken) {
        let id = registry.create().await;
        let result = tokio::select! {
            res = Self::serve(&registry, id, &mut socket) => res,
            () = cancel.cancelled() => Ok(()),
        };
        match result {
            Err(e) if e.is_disconnect() => {}
            Err(e) => warn!("Closing connection of session {id} due to {e:?}"),
            Ok(()) => {}
        }
        if let Err(e) = registry.destroy(id).await {
            warn!("Session {id} vanished before disconnect: {e}");
        }
        if let Err(e) = socket.shutdown().await {
            event!("Session {id}: socket shutdown failed: {e}");
        }
    }

    /// Answers upstream frames on `stream` for session `id` until the stream
    /// fails or closes.
    pub async fn serve<S>(registry: &SessionRegistry, id: SessionId, stream: &mut S) -> Result<(), EndpointError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        loop {
            let buffer = Self::read_frame(stream).await?;
            let reply = match Upstream::decode(buffer.as_slice()) {
                Ok(Upstream { content: Some(UpstreamContent::Ping(ping)) }) => {
                    DownstreamContent::Pong(Pong { echo: ping.echo })
                }
                Ok(Upstream { content: Some(UpstreamContent::PoseSample(sample)) }) => {
                    if let Some(reason) = sample.error.as_deref() {
                        event!("Session {id}: pose collaborator failed: {reason}");
                        DownstreamContent::FrameSkipped(FrameSkipped::because(SkipReason::PoseUnavailable))
                    } else {
                        let pose = sample.to_pose_frame();
                        match registry.process(id, pose.as_ref()).await? {
                            Some(out) => DownstreamContent::FrameResult(FrameResult::from(&out)),
                            None => DownstreamContent::FrameSkipped(FrameSkipped::because(SkipReason::Throttled)),
                        }
                    }
                }
                Ok(Upstream { content: None }) | Err(_) => {
                    event!("Session {id}: undecodable upstream frame of {} bytes", buffer.len());
                    DownstreamContent::FrameSkipped(FrameSkipped::because(SkipReason::Undecodable))
                }
            };
            Self::write_frame(stream, &Downstream { content: Some(reply) }.encode_to_vec()).await?;
        }
    }

    pub async fn read_frame<R: AsyncRead + Unpin>(socket: &mut R) -> Result<Vec<u8>, EndpointError> {
        let length = socket.read_u32().await?;
        if length > Self::MAX_FRAME_LEN {
            return Err(EndpointError::FrameTooLarge(length));
        }
        let mut buffer = vec![0u8; length as usize];
        socket.read_exact(&mut buffer).await?;
        Ok(buffer)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub async fn write_frame<W: AsyncWrite + Unpin>(socket: &mut W, buffer: &[u8]) -> Result<(), EndpointError> {
        socket.write_u32(buffer.len() as u32).await?;
        socket.write_all(buffer).await?;
        socket.flush().await?;
        Ok(())
    }
}
