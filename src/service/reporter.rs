use std::sync::mpsc::Sender;
use log::Level;
use crate::models::event::ProgressEvent;
use crate::service::traits::i_service::ReporterTrait;

/// 將訊息轉交給 log 門面，由 env_logger 輸出
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        LogReporter
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        LogReporter::new()
    }
}

impl ReporterTrait for LogReporter {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: "webp2png", level, "{}", message);
    }
}

/// 將訊息包成 ProgressEvent::Log 送往通道，背景執行緒不直接碰觸前景輸出
pub struct ChannelReporter {
    sender: Sender<ProgressEvent>,
}

impl ChannelReporter {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        ChannelReporter { sender }
    }
}

impl ReporterTrait for ChannelReporter {
    fn report(&self, level: Level, message: &str) {
        // 前景已結束接收時直接丟棄
        let _ = self.sender.send(ProgressEvent::Log {
            level,
            message: message.to_string(),
        });
    }
}
