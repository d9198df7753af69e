//! Builtin ComfyUI node types
//!
//! The registry is compiled in and never changes at runtime. Names in it are
//! considered part of ComfyUI core and have no repository metadata.

use std::collections::BTreeSet;
use std::sync::OnceLock;

#[rustfmt::skip]
const BUILTIN_NODE_TYPES: &[&str] = &[
    // Core nodes
    "BasicScheduler", "CLIPLoader", "CLIPMergeSimple", "CLIPSave", "CLIPSetLastLayer",
    "CLIPTextEncode", "CLIPTextEncodeSDXL", "CLIPTextEncodeSDXLRefiner", "CLIPVisionEncode",
    "CLIPVisionLoader", "Canny", "CheckpointLoader", "CheckpointLoaderSimple", "CheckpointSave",
    "EmptyLatentImage", "KSampler", "KSamplerAdvanced",
    // Conditioning
    "ConditioningAverage", "ConditioningCombine", "ConditioningConcat", "ConditioningSetArea",
    "ConditioningSetAreaPercentage", "ConditioningSetAreaStrength", "ConditioningSetMask",
    "ConditioningSetMaskAndCombine", "ConditioningSetMaskOrCombine", "ConditioningSetPosition",
    "ConditioningSetPositionAndCombine", "ConditioningSetRegion", "ConditioningSetTimestepRange",
    // ControlNet and LoRA
    "ControlLoraLoader", "ControlNetApply", "ControlNetApplyAdvanced", "ControlNetLoader",
    "LoraLoader", "LoraLoaderModelOnly",
    // Image processing
    "CropImage", "ImageScale", "ImageScaleBy", "ImageScaleToTotalPixels", "ImageUpscaleWithModel",
    "ImageBlend", "ImageBlur", "ImageCompositeMasked", "ImageCrop", "ImageInvert",
    "ImagePadForOutpaint", "ImageQuantize", "ImageSharpen", "ImageToMask",
    // Latent space
    "VAEDecode", "VAEEncode", "VAELoader", "VAESave", "VAEDecodeTiled", "VAEEncodeForInpaint",
    "VAEEncodeTiled", "LatentUpscale", "LatentUpscaleBy", "LatentFromBatch",
    // Loading and saving
    "LoadImage", "LoadImageMask", "LoadLatent", "SaveImage", "SaveLatent",
    "SaveAnimatedPNG", "SaveAnimatedWEBP",
    // Model operations
    "ModelMergeAdd", "ModelMergeBlocks", "ModelMergeSimple", "ModelMergeSubtract",
    "ModelSamplingContinuousEDM", "ModelSamplingDiscrete", "PatchModelAddDownscale",
    "StyleModelApply", "StyleModelLoader", "UNETLoader", "UpscaleModelLoader",
    // Samplers and schedulers
    "SamplerCustom", "SamplerDPMPP_2M_SDE", "SamplerDPMPP_SDE",
    "PolyexponentialScheduler", "SDTurboScheduler", "VPScheduler",
    // Other utilities
    "MaskComposite", "MaskToImage", "PerpNeg", "PhotoMakerEncode", "PhotoMakerLoader",
    "PorterDuffImageComposite", "PreviewImage", "RebatchImages", "RebatchLatents",
    "RepeatImageBatch", "RepeatLatentBatch", "RescaleCFG", "SD_4XUpscale_Conditioning",
    "SVD_img2vid_Conditioning", "SelfAttentionGuidance", "SetLatentNoiseMask",
    "SolidMask", "SplitImageWithAlpha", "SplitSigmas", "StableZero123_Conditioning",
    "StableZero123_Conditioning_Batched", "TomePatchModel", "VideoLinearCFGGuidance",
    "unCLIPCheckpointLoader", "unCLIPConditioning",
];

fn registry() -> &'static BTreeSet<&'static str> {
    static REGISTRY: OnceLock<BTreeSet<&'static str>> = OnceLock::new();
    REGISTRY.get_or_init(|| BUILTIN_NODE_TYPES.iter().copied().collect())
}

/// True if `node_type` names a builtin node (exact, case-sensitive match)
///
/// # Examples
///
/// ```
/// use comfy_copilot::nodes::is_builtin;
///
/// assert!(is_builtin("KSampler"));
/// assert!(!is_builtin("MyCustomNode"));
/// ```
pub fn is_builtin(node_type: &str) -> bool {
    registry().contains(node_type)
}

/// All builtin node types in byte-wise sorted order
pub fn builtin_types() -> Vec<&'static str> {
    registry().iter().copied().collect()
}

/// Number of distinct builtin node types
pub fn builtin_count() -> usize {
    registry().len()
}
