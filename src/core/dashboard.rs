use crate::core::stats::{aggregate, Stats};
use crate::domain::model::{Collection, Course, Enrollment, Instructor, Participant, Room};
use crate::domain::ports::CollectionLoader;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// One consistent snapshot of all five collections.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub instructors: Vec<Instructor>,
    pub rooms: Vec<Room>,
    pub participants: Vec<Participant>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
}

impl Collections {
    /// Fetches all five collections concurrently. The first failure fails the
    /// whole snapshot; nothing partial is returned.
    pub async fn fetch_all<L: CollectionLoader + ?Sized>(loader: &L) -> Result<Self> {
        let (instructors, rooms, participants, courses, enrollments) = tokio::try_join!(
            async {
                loader
                    .instructors()
                    .await
                    .map_err(|e| e.in_collection(Collection::Instructors))
            },
            async {
                loader
                    .rooms()
                    .await
                    .map_err(|e| e.in_collection(Collection::Rooms))
            },
            async {
                loader
                    .participants()
                    .await
                    .map_err(|e| e.in_collection(Collection::Participants))
            },
            async {
                loader
                    .courses()
                    .await
                    .map_err(|e| e.in_collection(Collection::Courses))
            },
            async {
                loader
                    .enrollments()
                    .await
                    .map_err(|e| e.in_collection(Collection::Enrollments))
            },
        )?;

        Ok(Self {
            instructors,
            rooms,
            participants,
            courses,
            enrollments,
        })
    }

    pub fn stats(&self) -> Stats {
        aggregate(
            &self.courses,
            &self.enrollments,
            &self.instructors,
            &self.rooms,
            &self.participants,
        )
    }
}

/// What the presentation layer sees. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// Generation of the load cycle that produced `stats`, 0 before any.
    pub generation: u64,
    pub stats: Option<Arc<Stats>>,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Set once the first load cycle finished, successfully or not.
    pub settled: bool,
}

impl DashboardView {
    pub fn is_loading(&self) -> bool {
        !self.settled
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Applied(Arc<Stats>),
    /// A newer cycle published first; this cycle's result was dropped.
    Superseded { generation: u64, current: u64 },
}

pub struct Dashboard<L: CollectionLoader> {
    loader: L,
    next_generation: AtomicU64,
    view: watch::Sender<DashboardView>,
}

impl<L: CollectionLoader> Dashboard<L> {
    pub fn new(loader: L) -> Self {
        let (view, _) = watch::channel(DashboardView::default());
        Self {
            loader,
            next_generation: AtomicU64::new(0),
            view,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn current(&self) -> Option<Arc<Stats>> {
        self.view.borrow().stats.clone()
    }

    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    /// Runs one load cycle.
    ///
    /// On failure the previously published stats stay in place and the error
    /// is returned. A result is only published if no cycle that started later
    /// has published already.
    pub async fn reload(&self) -> Result<LoadOutcome> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Starting load cycle {}", generation);

        let collections = match Collections::fetch_all(&self.loader).await {
            Ok(collections) => collections,
            Err(e) => {
                tracing::error!("❌ Load cycle {} failed: {}", generation, e);
                self.view.send_if_modified(|view| {
                    let changed = !view.settled;
                    view.settled = true;
                    changed
                });
                return Err(e);
            }
        };

        let stats = Arc::new(collections.stats());
        tracing::debug!(
            "Cycle {} aggregated {} courses, {} enrollments, revenue {}",
            generation,
            stats.courses,
            stats.enrollments,
            stats.revenue
        );

        let mut applied = false;
        self.view.send_if_modified(|view| {
            if generation <= view.generation {
                return false;
            }
            *view = DashboardView {
                generation,
                stats: Some(Arc::clone(&stats)),
                refreshed_at: Some(Utc::now()),
                settled: true,
            };
            applied = true;
            true
        });

        if applied {
            tracing::info!("✅ Dashboard refreshed (cycle {})", generation);
            Ok(LoadOutcome::Applied(stats))
        } else {
            let current = self.view.borrow().generation;
            tracing::warn!(
                "Discarding result of cycle {}; cycle {} is already published",
                generation,
                current
            );
            Ok(LoadOutcome::Superseded {
                generation,
                current,
            })
        }
    }
}
