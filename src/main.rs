use anyhow::Result;
use issue_batch_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    issue_batch_submit::utils::logging::init();

    // 加载 .env（不存在时忽略）和配置
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
