use std::path::Path;

use anyhow::Context;
use prost::Message;
use tracing::{debug, info};

use super::proto::{
    code_generator_response, CodeGeneratorRequest, CodeGeneratorResponse, FileDescriptorSet,
};

/// Decode a binary `FileDescriptorSet` (`protoc --descriptor_set_out`).
pub fn decode_descriptor_set(bytes: &[u8]) -> anyhow::Result<FileDescriptorSet> {
    let set = FileDescriptorSet::decode(bytes).context("failed to decode FileDescriptorSet")?;
    debug!(files = set.file.len(), bytes = bytes.len(), "Descriptor set decoded");
    Ok(set)
}

/// Read and decode a descriptor set file.
pub fn load_descriptor_set(path: &Path) -> anyhow::Result<FileDescriptorSet> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read descriptor set: {}", path.display()))?;
    let set = decode_descriptor_set(&bytes)
        .with_context(|| format!("Invalid descriptor set: {}", path.display()))?;
    info!(
        path = %path.display(),
        files = set.file.len(),
        with_source_info = set.file.iter().filter(|f| f.source_code_info.is_some()).count(),
        "Descriptor set loaded"
    );
    Ok(set)
}

/// Decode the request protoc writes to a plugin's stdin.
pub fn decode_plugin_request(bytes: &[u8]) -> anyhow::Result<CodeGeneratorRequest> {
    let request =
        CodeGeneratorRequest::decode(bytes).context("failed to decode CodeGeneratorRequest")?;
    debug!(
        files_to_generate = ?request.file_to_generate,
        proto_files = request.proto_file.len(),
        parameter = ?request.parameter,
        "Plugin request decoded"
    );
    Ok(request)
}

/// Encode a plugin response from `(name, content)` pairs or an error message.
#[must_use]
pub fn encode_plugin_response(result: Result<Vec<(String, String)>, String>) -> Vec<u8> {
    let response = match result {
        Ok(files) => CodeGeneratorResponse {
            error: None,
            supported_features: Some(code_generator_response::FEATURE_PROTO3_OPTIONAL),
            file: files
                .into_iter()
                .map(|(name, content)| code_generator_response::File {
                    name: Some(name),
                    insertion_point: None,
                    content: Some(content),
                })
                .collect(),
        },
        Err(error) => CodeGeneratorResponse {
            error: Some(error),
            supported_features: Some(code_generator_response::FEATURE_PROTO3_OPTIONAL),
            file: Vec::new(),
        },
    };
    response.encode_to_vec()
}
