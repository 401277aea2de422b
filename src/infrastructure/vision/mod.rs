mod provider_ocr_adapter;

pub use provider_ocr_adapter::ProviderOcrAdapter;
