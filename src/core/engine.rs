use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting batch classification...");

        // Extract
        println!("Reading articles...");
        let articles = self.pipeline.extract().await?;
        println!("Read {} articles", articles.len());
        self.monitor.log_stats("Extract");

        // Transform
        println!("Classifying...");
        let result = self.pipeline.transform(articles).await?;
        println!(
            "Classified {} articles ({} skipped)",
            result.classified.len(),
            result.skipped.len()
        );
        self.monitor.log_stats("Classify");

        // Load
        println!("Writing results...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
