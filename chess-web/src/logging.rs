//! 日志初始化
//!
//! 订阅者在读取设置之前安装，这样加载设置时的警告不会丢失；
//! 设置中的过滤规则随后通过 reload 句柄生效。

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// 设置加载前使用的过滤规则
pub const DEFAULT_FILTER: &str = "info";

/// 调整全局过滤规则的句柄
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// 应用设置中的过滤规则；RUST_LOG 仍然优先
    pub fn apply(&self, filter: &str) -> Result<()> {
        let env_filter = build_filter(filter)?;
        if let Err(e) = self.filter.reload(env_filter) {
            // 订阅者没有安装成功（例如已有全局订阅者）
            tracing::debug!(error = %e, "日志过滤规则未更新");
        }
        Ok(())
    }
}

/// 安装全局日志，返回之后调整过滤规则用的句柄
///
/// 重复调用时保留第一次安装的订阅者。
pub fn init_logging() -> Result<LogHandle> {
    let (subscriber, handle) = subscriber(std::io::stdout)?;
    let _ = subscriber.try_init();
    Ok(handle)
}

/// 构造订阅者：reload 包装的 EnvFilter + fmt 层
fn subscriber<W>(writer: W) -> Result<(impl Subscriber + Send + Sync, LogHandle)>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(build_filter(DEFAULT_FILTER)?);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(writer));

    Ok((subscriber, LogHandle { filter: handle }))
}

fn build_filter(filter: &str) -> Result<EnvFilter> {
    let base = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    Ok(base.add_directive("chess_web=debug".parse()?))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::settings::DemoSettings;

    /// 把日志输出收集到内存
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let first = init_logging().unwrap();
        let second = init_logging().unwrap();
        assert!(first.apply("info").is_ok());
        assert!(second.apply("chess_core=trace").is_ok());
    }

    #[test]
    fn test_invalid_filter_falls_back() {
        assert!(build_filter("[[not a filter").is_ok());
    }

    #[test]
    fn test_settings_warning_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let (subscriber, handle) = subscriber(move || writer.clone()).unwrap();

        // 与 main 相同的顺序：先有订阅者，再读取设置，最后应用过滤规则
        let settings = tracing::subscriber::with_default(subscriber, || {
            let settings = DemoSettings::load(Some(&path));
            handle.apply(&settings.log_filter).unwrap();
            settings
        });

        assert_eq!(settings, DemoSettings::default());
        assert!(captured.text().contains("设置文件无效"), "got: {}", captured.text());
    }
}
