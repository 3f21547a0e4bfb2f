use super::{flight_session::FlightSession, frame_output::FrameOutput};
use crate::pose::PoseFrame;
use crate::session;
use chrono::{DateTime, TimeDelta, Utc};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use strum_macros::Display;
use tokio::sync::{Mutex, RwLock};

pub type SessionId = u64;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum SessionError {
    UnknownSession(SessionId),
}

impl std::error::Error for SessionError {}

/// All live sessions, keyed by id.
///
/// Sessions share nothing; each sits behind its own mutex so frames for one
/// session are processed strictly in sequence while different sessions run
/// in parallel.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<FlightSession>>>>,
    next_id: AtomicU64,
    min_frame_interval: TimeDelta,
}

impl SessionRegistry {
    pub fn new(min_frame_interval: TimeDelta) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), next_id: AtomicU64::new(1), min_frame_interval }
    }

    pub async fn create(&self) -> SessionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let flight = FlightSession::new(self.min_frame_interval);
        self.sessions.write().await.insert(id, Arc::new(Mutex::new(flight)));
        session!("Created session {id}");
        id
    }

    pub async fn process(&self, id: SessionId, pose: Option<&PoseFrame>) -> Result<Option<FrameOutput>, SessionError> {
        self.process_at(id, pose, Utc::now()).await
    }

    /// Processes a frame for `id`. `Ok(None)` means the frame was throttled.
    pub async fn process_at(
        &self,
        id: SessionId,
        pose: Option<&PoseFrame>,
        now: DateTime<Utc>,
    ) -> Result<Option<FrameOutput>, SessionError> {
        let flight = self.get(id).await?;
        let mut flight_lock = flight.lock().await;
        Ok(flight_lock.process_frame_at(pose, now))
    }

    /// Drops the session and all its state.
    pub async fn destroy(&self, id: SessionId) -> Result<(), SessionError> {
        let removed = self.sessions.write().await.remove(&id).ok_or(SessionError::UnknownSession(id))?;
        let flight = removed.lock().await;
        session!(
            "Destroyed session {id} after {} frames ({} dropped)",
            flight.processed_frames(),
            flight.dropped_frames()
        );
        Ok(())
    }

    pub async fn get(&self, id: SessionId) -> Result<Arc<Mutex<FlightSession>>, SessionError> {
        self.sessions.read().await.get(&id).map(Arc::clone).ok_or(SessionError::UnknownSession(id))
    }

    pub async fn len(&self) -> usize { self.sessions.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.sessions.read().await.is_empty() }
}
