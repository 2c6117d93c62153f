//! The reset barrier: a single-writer token ordering destructive grid
//! resets against in-flight batched line patches.
//!
//! A reset deletes every row before re-inserting placeholders; a patch that
//! races it could target rows mid-deletion and be silently dropped. Patches
//! therefore hold the token shared and resets hold it exclusively. Readers
//! are deliberately not synchronized — the grid promises no read isolation,
//! and a reader may observe a mix of old and new content mid-batch.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct ResetBarrier {
  token: RwLock<()>,
}

impl ResetBarrier {
  pub fn new() -> Self {
    Self {
      token: RwLock::new(()),
    }
  }

  /// Acquired by batched line patches. Many may hold it at once.
  pub async fn shared(&self) -> RwLockReadGuard<'_, ()> {
    self.token.read().await
  }

  /// Acquired by grid resets; waits out all in-flight patches and blocks
  /// new ones until the reset completes.
  pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
    self.token.write().await
  }
}

impl Default for ResetBarrier {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;

  #[tokio::test]
  async fn reset_waits_for_inflight_patches() {
    let barrier = Arc::new(ResetBarrier::new());

    let patch_guard = barrier.shared().await;

    let b = barrier.clone();
    let reset = tokio::spawn(async move {
      let _g = b.exclusive().await;
    });

    // The reset cannot finish while the patch guard is held.
    tokio::task::yield_now().await;
    assert!(!reset.is_finished());

    drop(patch_guard);
    reset.await.unwrap();
  }

  #[tokio::test]
  async fn patches_may_overlap() {
    let barrier = ResetBarrier::new();
    let a = barrier.shared().await;
    let b = barrier.shared().await;
    drop((a, b));
  }
}
