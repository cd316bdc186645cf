#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::path::PathBuf;

    use chess_web::{logging, run_demo, DemoSettings};
    use tracing::info;

    // 先初始化日志，加载设置时的警告才能输出
    let log = logging::init_logging()?;

    // 第一个参数可以指定设置文件
    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = DemoSettings::load(settings_path.as_deref());
    log.apply(&settings.log_filter)?;

    info!("国际象棋演示启动中...");

    let engine = chess_web::load_engine().await;
    let mut stdout = std::io::stdout().lock();
    let summary = run_demo(engine, &settings, &mut stdout)?;

    info!(
        successors = summary.successors,
        plies = summary.plies_walked,
        malformed_rejected = summary.malformed_rejected,
        "演示结束"
    );

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
