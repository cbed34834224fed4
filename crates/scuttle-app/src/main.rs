//! # scuttle-app
//!
//! Scuttle 바이너리 진입점.
//! CLI 파싱, 로깅 초기화, 어댑터 와이어링, 자동 스커틀 실행.

mod context;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use scuttle_automation::controller::ScuttleController;
use scuttle_automation::event_bus::EventBus;
use scuttle_automation::input_driver::create_platform_input_driver;
use scuttle_automation::probe::ClockServerProbe;
use scuttle_core::models::scuttle::ScuttleEvent;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::context::{AppContext, StoreLocation};

/// Scuttle: 목표 서버 설정 및 자동 스커틀
#[derive(Parser, Debug)]
#[command(name = "scuttle")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 데이터 저장 경로 (기본: 플랫폼 데이터 디렉토리)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// 인메모리 저장소 사용 (아무것도 저장하지 않음)
    #[arg(long, global = true, conflicts_with = "data_dir")]
    ephemeral: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 목표 서버 조회/변경
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// 자동 스커틀 실행 (목표 서버 도달 또는 최대 시도까지)
    Run {
        /// 실행 전에 목표 서버 변경
        #[arg(long)]
        target: Option<String>,

        /// 최대 시도 횟수 (설정값 덮어쓰기)
        #[arg(long)]
        max_attempts: Option<u32>,
    },
    /// 설정 조회
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum TargetAction {
    /// 저장된 목표 서버 출력
    Show,
    /// 목표 서버 저장
    Set { server: String },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 적용 중인 설정을 JSON으로 출력
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG가 있으면 우선
    let log_filter = format!(
        "scuttle={},scuttle_app={},scuttle_core={},scuttle_storage={},scuttle_automation={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let location = if args.ephemeral {
        StoreLocation::Ephemeral
    } else {
        StoreLocation::Disk(args.data_dir.clone())
    };
    let ctx = AppContext::build(args.config.as_deref(), location)?;

    match args.command {
        Command::Target { action } => match action {
            TargetAction::Show => {
                let target = ctx.store.target_server();
                if target.is_empty() {
                    println!("(none)");
                } else {
                    println!("{target}");
                }
            }
            TargetAction::Set { server } => {
                ctx.store.set_target_server(&server);
                info!(target_server = %server, "목표 서버 변경");
                println!("{server}");
            }
        },
        Command::Config { action } => match action {
            ConfigAction::Show => {
                let json = serde_json::to_string_pretty(&ctx.config.get())
                    .context("설정 직렬화 실패")?;
                println!("{json}");
            }
        },
        Command::Run {
            target,
            max_attempts,
        } => run_scuttle(&ctx, target, max_attempts).await?,
    }

    Ok(())
}

/// 자동 스커틀을 시작하고 종료 이벤트까지 진행 상황을 출력
async fn run_scuttle(
    ctx: &AppContext,
    target: Option<String>,
    max_attempts: Option<u32>,
) -> Result<()> {
    if let Some(ref server) = target {
        ctx.store.set_target_server(server);
    }
    let target_server = ctx.store.target_server();
    if target_server.is_empty() {
        bail!("목표 서버가 없습니다. `scuttle target set <SERVER>` 또는 `--target`으로 지정하세요");
    }

    let mut scuttle_config = ctx.config.get().scuttle;
    if let Some(max) = max_attempts {
        scuttle_config.max_attempts = max;
    }

    let controller = ScuttleController::new(
        Arc::clone(&ctx.store),
        Arc::from(create_platform_input_driver()),
        Arc::new(ClockServerProbe),
        scuttle_config,
        EventBus::default(),
    );
    let mut events = controller.subscribe();
    controller.start(&target_server)?;

    let mut interrupted = false;
    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => {
                    println!("{}", serde_json::to_string(&event)?);
                    if event.is_terminal() {
                        report_outcome(&event);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "이벤트 일부 누락"),
                Err(RecvError::Closed) => break,
            },
            signal = tokio::signal::ctrl_c(), if !interrupted => {
                signal.context("Ctrl-C 핸들러 등록 실패")?;
                info!("종료 시그널 수신, 자동 스커틀 중지");
                interrupted = true;
                controller.stop();
            }
        }
    }

    Ok(())
}

fn report_outcome(event: &ScuttleEvent) {
    match event {
        ScuttleEvent::TargetReached { server, attempts } => {
            info!(%server, attempts, "목표 서버 도달");
        }
        ScuttleEvent::MaxAttemptsReached { attempts } => {
            warn!(attempts, "최대 시도 횟수 도달, 목표 서버에 도달하지 못함");
        }
        ScuttleEvent::Stopped => info!("자동 스커틀 중지됨"),
        _ => {}
    }
}
