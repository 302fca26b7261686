use crate::ai::{GenerativeBackend, ImageRequest};
use crate::error::AIError;
use crate::scene_image::SceneImage;

pub const IMAGE_STYLE_SUFFIX: &str = "Style: like a frame from a 1980s crime thriller movie, photorealistic with film grain, gritty, noir.";

pub const OPENING_IMAGE_PROMPT: &str = "A gritty, dimly lit, small studio apartment in Hell's Kitchen, New York City, 1986. A single window shows a sliver of the grimy brick building opposite. A messy unmade bed, a small kitchenette with dirty dishes. The style should be like a frame from a 1980s crime thriller movie, photorealistic with film grain.";

pub fn scene_image_prompt(scene_description: &str) -> String {
    format!("{scene_description} {IMAGE_STYLE_SUFFIX}")
}

pub fn scene_image_request(prompt: &str) -> ImageRequest {
    ImageRequest {
        prompt: prompt.to_string(),
        count: 1,
        mime_type: "image/jpeg",
        aspect_ratio: "16:9",
    }
}

/// Generates a single picture. An empty result is not an error: the fallback image is used.
pub async fn generate_image<B: GenerativeBackend>(
    backend: &B,
    prompt: &str,
) -> Result<SceneImage, AIError> {
    let images = backend.generate_images(&scene_image_request(prompt)).await?;

    match images.into_iter().next() {
        Some(image) => Ok(SceneImage::DataUri {
            mime_type: image.mime_type,
            data: image.data,
        }),
        None => {
            log::warn!("Image service returned no images, using the fallback");
            Ok(SceneImage::fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_suffix_follows_the_description() {
        assert_eq!(
            scene_image_prompt("Rain on the fire escape."),
            "Rain on the fire escape. Style: like a frame from a 1980s crime thriller movie, photorealistic with film grain, gritty, noir."
        );
    }

    #[test]
    fn request_is_one_wide_jpeg() {
        let request = scene_image_request("x");
        assert_eq!(request.count, 1);
        assert_eq!(request.mime_type, "image/jpeg");
        assert_eq!(request.aspect_ratio, "16:9");
    }
}
