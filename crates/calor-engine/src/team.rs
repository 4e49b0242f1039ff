//! Long-lived thread team with barrier phases and a designated leader.
//!
//! A [`ThreadTeam`] is created once per run and its members live for the
//! whole run; they are not respawned per step. Member 0 is the leader,
//! chosen before the run starts. It executes on the calling thread,
//! which lets it hold non-`Send` state such as a borrowed snapshot sink.
//! Members `1..size` run on scoped worker threads.
//!
//! ```text
//! member 0 (caller) ──┬── phase ── wait ── single{..} ── wait ── ...
//! member 1 (worker) ──┤── phase ── wait ──     ·      ── wait ── ...
//! member k (worker) ──┘── phase ── wait ──     ·      ── wait ── ...
//! ```

use std::sync::Barrier;
use std::thread;

use calor_core::ThreadCount;

/// A fixed-size group of cooperating threads.
pub struct ThreadTeam {
    size: ThreadCount,
    barrier: Barrier,
}

/// One member's handle onto its team.
pub struct Member<'t> {
    rank: usize,
    team: &'t ThreadTeam,
}

impl ThreadTeam {
    /// Create a team of `size` members.
    pub fn new(size: ThreadCount) -> Self {
        Self {
            size,
            barrier: Barrier::new(size.get()),
        }
    }

    /// Number of members.
    pub fn size(&self) -> ThreadCount {
        self.size
    }

    /// Run `body` once on every member and return when all have finished.
    ///
    /// `parts` holds one piece of owned work per member, in rank order;
    /// member `k` receives `parts[k]`. The leader (rank 0) also receives
    /// `Some(leader_state)`, every other member receives `None`. Every
    /// member must perform the same sequence of barrier waits or the team
    /// deadlocks.
    pub fn run<P, S, F>(&self, parts: Vec<P>, leader_state: &mut S, body: F)
    where
        P: Send,
        F: Fn(&Member<'_>, P, Option<&mut S>) + Sync,
    {
        debug_assert_eq!(parts.len(), self.size.get(), "one part per member");
        let body = &body;
        let mut parts = parts.into_iter();
        let Some(first) = parts.next() else {
            return;
        };
        thread::scope(|scope| {
            for (rank, part) in (1..self.size.get()).zip(parts) {
                let member = Member { rank, team: self };
                scope.spawn(move || body(&member, part, None));
            }
            let leader = Member {
                rank: 0,
                team: self,
            };
            body(&leader, first, Some(leader_state));
        });
    }
}

impl Member<'_> {
    /// This member's index in `0..size`.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether this member is the designated leader.
    pub fn is_leader(&self) -> bool {
        self.rank == 0
    }

    /// Block until every member reaches this point.
    pub fn wait(&self) {
        self.team.barrier.wait();
    }

    /// Single-executor section: the leader runs `f`, then every member
    /// waits until it has finished.
    pub fn single<F: FnOnce()>(&self, f: F) {
        if self.is_leader() {
            f();
        }
        self.wait();
    }
}
