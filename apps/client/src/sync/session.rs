//! The per-room synchronization loop.
//!
//! Invariant maintained here: the published view always equals
//! `project(room, latest known turn log, local player)`. The change feed
//! only ever says "something changed"; every re-derivation starts from a
//! full re-fetch of the turn log, because partially merging one pushed row
//! cannot preserve total order across two independently-writing clients.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::domain::{project, Room, ViewState};
use crate::errors::{GameError, NotFoundKind};
use crate::store::{GameStore, StoreSubscription};

/// Handle to a running synchronization loop for one room.
///
/// The loop owns a store subscription and republishes a fresh `ViewState`
/// through a watch channel whenever the backing log changes. Stopping the
/// handle (or dropping every view receiver) tears the loop down; the
/// subscription is released before the loop goes quiet, so nothing can be
/// published after release.
#[derive(Debug)]
pub struct SyncSession {
    view: watch::Receiver<ViewState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SyncSession {
    /// Activate a session: subscribe, take one full snapshot, publish the
    /// initial view, and spawn the refresh loop.
    ///
    /// Subscribing happens before the first fetch so a change landing
    /// between the two is already queued on the notification channel
    /// instead of lost.
    pub async fn start(
        store: Arc<dyn GameStore>,
        room_id: Uuid,
        local_player: impl Into<String>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        let local_player = local_player.into();
        let subscription = store.subscribe(room_id).await?;

        let room = match store.fetch_room(room_id).await {
            Ok(Some(room)) => room,
            Ok(None) => {
                store.unsubscribe(subscription.token).await;
                return Err(GameError::not_found(
                    NotFoundKind::Room,
                    format!("room {room_id} does not exist"),
                ));
            }
            Err(err) => {
                store.unsubscribe(subscription.token).await;
                return Err(err.into());
            }
        };
        let turns = match store.fetch_turns(room_id).await {
            Ok(turns) => turns,
            Err(err) => {
                store.unsubscribe(subscription.token).await;
                return Err(err.into());
            }
        };

        let view = project(&room, &turns, &local_player, config.progress_target);
        info!(
            %room_id,
            player = %local_player,
            max_turn = view.max_turn_number,
            phase = ?view.phase,
            "sync session started"
        );

        let (tx, rx) = watch::channel(view);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_loop(
            store,
            subscription,
            room,
            local_player,
            config,
            tx,
            cancel.clone(),
        ));

        Ok(Self {
            view: rx,
            cancel,
            task,
        })
    }

    /// A watch receiver over published views.
    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// The most recently published view.
    pub fn current_view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Deactivate the session. No view is published after this returns.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            warn!(error = %err, "sync loop terminated abnormally");
        }
    }
}

async fn run_loop(
    store: Arc<dyn GameStore>,
    subscription: StoreSubscription,
    room: Room,
    local_player: String,
    config: GameConfig,
    tx: watch::Sender<ViewState>,
    cancel: CancellationToken,
) {
    let StoreSubscription {
        token,
        room_id,
        receiver,
    } = subscription;
    let mut changes = BroadcastStream::new(receiver);
    // Fetch request counter; only the latest issued request may publish.
    let mut issued: u64 = 0;
    let mut published_max = tx.borrow().max_turn_number;

    'active: loop {
        // Wait for the next advisory signal.
        tokio::select! {
            _ = cancel.cancelled() => break 'active,
            signal = changes.next() => match signal {
                None => {
                    warn!(%room_id, "change feed closed, ending session");
                    break 'active;
                }
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                    // Missed events collapse into the same "re-derive".
                    debug!(%room_id, skipped, "change feed lagged");
                }
                Some(Ok(event)) => {
                    debug!(%room_id, ?event, "change signal");
                }
            },
        }

        // Re-fetch until a snapshot survives. A fetch still in flight when
        // a newer signal arrives is abandoned on the spot: its result can
        // only be as old as the signal that superseded it.
        'refetch: loop {
            issued += 1;
            let request = issued;
            let fetch = store.fetch_turns(room_id);
            tokio::pin!(fetch);

            let fetched = tokio::select! {
                _ = cancel.cancelled() => break 'active,
                result = &mut fetch => result,
                signal = changes.next() => match signal {
                    None => {
                        warn!(%room_id, "change feed closed mid-fetch, ending session");
                        break 'active;
                    }
                    Some(_) => {
                        debug!(%room_id, request, "fetch superseded by newer signal");
                        continue 'refetch;
                    }
                },
            };

            match fetched {
                Ok(turns) => {
                    debug_assert_eq!(request, issued, "a superseded fetch must not complete");
                    let view = project(&room, &turns, &local_player, config.progress_target);
                    if view.max_turn_number < published_max {
                        // Never show a snapshot older than one already shown.
                        warn!(
                            %room_id,
                            request,
                            snapshot_max = view.max_turn_number,
                            published_max,
                            "discarding stale snapshot"
                        );
                    } else {
                        published_max = view.max_turn_number;
                        if tx.send(view).is_err() {
                            debug!(%room_id, "all view receivers dropped, ending session");
                            break 'active;
                        }
                    }
                    break 'refetch;
                }
                Err(err) => {
                    // Keep the previous view on a failed refresh; the next
                    // signal triggers another attempt. A blank view is
                    // worse than a briefly stale one.
                    warn!(%room_id, request, error = %err, "turn refetch failed, keeping last view");
                    break 'refetch;
                }
            }
        }
    }

    // Release before going quiet so nothing can publish after this point.
    store.unsubscribe(token).await;
    debug!(%room_id, player = %local_player, "sync session stopped");
}
