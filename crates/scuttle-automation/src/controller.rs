//! 자동 스커틀 제어기.
//!
//! 목표 서버에 도달할 때까지 트리거 키 입력 → 대기 → 현재 서버 확인을 반복한다.
//! 실행 여부는 `ScuttleStore`의 `running` 필드가 기준이며,
//! 누가 이 값을 `false`로 바꾸든 루프는 다음 대기 지점에서 끝난다.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, warn};

use scuttle_core::config::ScuttleConfig;
use scuttle_core::error::CoreError;
use scuttle_core::models::scuttle::{ScuttleEvent, ScuttleStatus};
use scuttle_core::observable::SubscriptionId;
use scuttle_core::ports::input_driver::InputDriver;
use scuttle_core::ports::server_probe::ServerProbe;
use scuttle_storage::scuttle_store::ScuttleStore;

use crate::event_bus::EventBus;

/// 현재 실행의 부가 정보
#[derive(Debug, Default)]
struct RunState {
    /// 시작/중지마다 증가. 이전 실행의 루프가 새 실행을 건드리지 않게 한다.
    generation: u64,
    attempts: u32,
    target_server: Option<String>,
    started_at: Option<DateTime<Utc>>,
}

struct Inner {
    store: Arc<ScuttleStore>,
    input: Arc<dyn InputDriver>,
    probe: Arc<dyn ServerProbe>,
    config: ScuttleConfig,
    events: EventBus,
    run: Mutex<RunState>,
    running_rx: watch::Receiver<bool>,
}

/// 루프 한 번의 결과
enum Step {
    Continue,
    Finished,
}

// ============================================================
// ScuttleController
// ============================================================

/// 자동 스커틀 제어기
pub struct ScuttleController {
    inner: Arc<Inner>,
    subscription: SubscriptionId,
}

impl ScuttleController {
    pub fn new(
        store: Arc<ScuttleStore>,
        input: Arc<dyn InputDriver>,
        probe: Arc<dyn ServerProbe>,
        config: ScuttleConfig,
        events: EventBus,
    ) -> Self {
        // running 필드 변경을 대기 중인 루프에 전달
        let (running_tx, running_rx) = watch::channel(store.running());
        let subscription = store.subscribe_running(move |running| {
            running_tx.send_replace(*running);
        });

        info!(
            input = input.platform(),
            probe = probe.name(),
            max_attempts = config.max_attempts,
            "자동 스커틀 제어기 초기화"
        );

        Self {
            inner: Arc::new(Inner {
                store,
                input,
                probe,
                config,
                events,
                run: Mutex::new(RunState::default()),
                running_rx,
            }),
            subscription,
        }
    }

    /// 자동 스커틀 시작
    ///
    /// Tokio 런타임 안에서 호출해야 한다. 루프는 백그라운드 태스크로 실행된다.
    pub fn start(&self, target_server: &str) -> Result<(), CoreError> {
        if target_server.is_empty() {
            return Err(CoreError::InvalidArguments(
                "목표 서버가 설정되지 않음".to_string(),
            ));
        }

        let inner = &self.inner;
        // 비교와 교체가 원자적이므로 두 번째 시작은 여기서 막힌다
        if !inner.store.set_running(true) {
            return Err(CoreError::AlreadyRunning);
        }

        let generation = {
            let mut run = inner.run.lock();
            run.generation += 1;
            run.attempts = 0;
            run.target_server = Some(target_server.to_string());
            run.started_at = Some(Utc::now());
            run.generation
        };

        info!(target_server, "자동 스커틀 시작");
        inner.events.publish(ScuttleEvent::Started {
            target_server: target_server.to_string(),
        });

        let task_inner = Arc::clone(inner);
        let target = target_server.to_string();
        tokio::spawn(async move {
            task_inner.run_loop(generation, target).await;
        });
        Ok(())
    }

    /// 자동 스커틀 중지. 실행 중이었으면 `true`.
    pub fn stop(&self) -> bool {
        let inner = &self.inner;
        // 세대를 먼저 올려야 깨어난 루프가 중지 이벤트를 중복 발행하지 않는다
        {
            let mut run = inner.run.lock();
            run.generation += 1;
            run.attempts = 0;
            run.target_server = None;
            run.started_at = None;
        }
        let was_running = inner.store.set_running(false);
        if was_running {
            info!("자동 스커틀 중지");
            inner.events.publish(ScuttleEvent::Stopped);
        }
        was_running
    }

    pub fn status(&self) -> ScuttleStatus {
        let run = self.inner.run.lock();
        ScuttleStatus {
            running: self.inner.store.running(),
            attempts: run.attempts,
            target_server: run.target_server.clone(),
            started_at: run.started_at,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScuttleEvent> {
        self.inner.events.subscribe()
    }
}

impl Drop for ScuttleController {
    fn drop(&mut self) {
        // 루프를 멈추고 running을 해제한 뒤에 구독을 끊는다
        self.stop();
        self.inner.store.unsubscribe_running(self.subscription);
    }
}

impl Inner {
    async fn run_loop(&self, generation: u64, target: String) {
        let mut running = self.running_rx.clone();
        loop {
            match self.attempt(generation, &target, &mut running).await {
                Step::Continue => {}
                Step::Finished => return,
            }
        }
    }

    async fn attempt(
        &self,
        generation: u64,
        target: &str,
        running: &mut watch::Receiver<bool>,
    ) -> Step {
        let attempt = {
            let mut run = self.run.lock();
            if run.generation != generation {
                return Step::Finished;
            }
            if !self.store.running() {
                drop(run);
                self.finish_stopped(generation);
                return Step::Finished;
            }
            if run.attempts >= self.config.max_attempts {
                let attempts = run.attempts;
                drop(run);
                self.store.set_running(false);
                info!(attempts, "최대 시도 횟수 도달, 자동 스커틀 종료");
                self.events
                    .publish(ScuttleEvent::MaxAttemptsReached { attempts });
                return Step::Finished;
            }
            run.attempts += 1;
            run.attempts
        };

        info!(attempt, "자동 스커틀 시도");
        self.events.publish(ScuttleEvent::Attempt { attempt });

        // 1. 트리거 키로 스커틀 메뉴 호출
        let key = self.config.trigger_key.as_str();
        if let Err(e) = self.input.key_press(key).await {
            error!(key, "트리거 키 입력 실패: {e}");
            return Step::Continue;
        }
        pause(running, self.config.key_hold()).await;
        if let Err(e) = self.input.key_release(key).await {
            warn!(key, "트리거 키 놓기 실패: {e}");
        }

        // 2. 서버 이동 대기
        if !pause(running, self.config.settle()).await {
            self.finish_stopped(generation);
            return Step::Finished;
        }

        // 3. 현재 서버 확인
        match self.probe.current_server().await {
            Ok(server) => {
                // 대기 중에 중지 후 재시작되었으면 이 루프의 결과는 버린다
                if !self.is_current(generation) {
                    return Step::Finished;
                }
                info!(current = %server, target, "현재 서버 확인");
                self.events.publish(ScuttleEvent::ServerObserved {
                    attempt,
                    server: server.clone(),
                });
                if server == target {
                    self.store.set_running(false);
                    info!(attempts = attempt, "목표 서버 도달");
                    self.events.publish(ScuttleEvent::TargetReached {
                        server,
                        attempts: attempt,
                    });
                    return Step::Finished;
                }
            }
            Err(e) => error!("현재 서버 확인 실패: {e}"),
        }

        // 4. 다음 시도 전 잠시 대기
        if !pause(running, self.config.retry_pause()).await {
            self.finish_stopped(generation);
            return Step::Finished;
        }
        Step::Continue
    }

    fn is_current(&self, generation: u64) -> bool {
        self.run.lock().generation == generation
    }

    /// 외부에서 running이 해제되었거나 신호 채널이 닫힌 경우의 종료 처리.
    /// `stop()`을 통한 중지는 세대가 이미 바뀌어 있으므로 여기서 아무것도 하지 않는다.
    fn finish_stopped(&self, generation: u64) {
        if self.is_current(generation) {
            self.store.set_running(false);
            info!("실행 플래그 해제 감지, 자동 스커틀 종료");
            self.events.publish(ScuttleEvent::Stopped);
        }
    }
}

/// `duration`만큼 대기. 도중에 실행이 해제되거나 신호 채널이 닫히면 즉시 `false`를 반환한다.
async fn pause(running: &mut watch::Receiver<bool>, duration: Duration) -> bool {
    let stopped = tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = running.wait_for(|r| !*r) => true,
    };
    !stopped && *running.borrow()
}
