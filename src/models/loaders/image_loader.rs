use crate::models::ImageFile;
use anyhow::{Context, Result};
use mime_guess::Mime;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 读取单个文件，按扩展名推断 MIME 类型
///
/// 只有 `image/*` 才读取内容；其他文件内容为空，
/// 交给编排层当作非图片过滤掉。无法识别的扩展名记为
/// `application/octet-stream`。
pub async fn load_image_file(path: &Path) -> Result<ImageFile> {
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();

    let data = if is_image_mime(&mime_type) {
        fs::read(path)
            .await
            .with_context(|| format!("无法读取文件: {}", path.display()))?
    } else {
        Vec::new()
    };

    Ok(ImageFile::new(
        display_name(path),
        mime_type.essence_str(),
        data,
    ))
}

/// 把一个命令行路径展开成一批文件
///
/// - 文件：本身就是一批
/// - 目录：目录下的直接文件，按文件名排序（不递归）
///
/// 目录中读取失败的文件仍然留在批次里（计入总数），
/// 但标记为 `application/octet-stream`，不会被识别。
pub async fn load_batch(path: &Path) -> Result<Vec<ImageFile>> {
    let metadata = fs::metadata(path)
        .await
        .with_context(|| format!("路径不存在: {}", path.display()))?;

    if metadata.is_file() {
        return Ok(vec![load_image_file(path).await?]);
    }

    let mut file_paths: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir(path)
        .await
        .with_context(|| format!("无法读取文件夹: {}", path.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        let listed = if file_type.is_symlink() {
            // 悬空链接也算一个文件，读取时再失败
            fs::metadata(entry.path())
                .await
                .map(|target| target.is_file())
                .unwrap_or(true)
        } else {
            file_type.is_file()
        };
        if listed {
            file_paths.push(entry.path());
        }
    }
    file_paths.sort();

    let mut files = Vec::with_capacity(file_paths.len());
    for file_path in &file_paths {
        match load_image_file(file_path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", file_path.display(), e);
                files.push(unreadable(file_path));
            }
        }
    }

    let images = files.iter().filter(|f| f.is_image()).count();
    tracing::info!(
        "📁 {} 中找到 {} 个文件（图片 {} 张）",
        path.display(),
        files.len(),
        images
    );

    Ok(files)
}

fn is_image_mime(mime_type: &Mime) -> bool {
    mime_type.type_() == mime_guess::mime::IMAGE
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 读不出来的文件：保留名称，内容为空，不当作图片
fn unreadable(path: &Path) -> ImageFile {
    ImageFile::new(
        display_name(path),
        mime_guess::mime::APPLICATION_OCTET_STREAM.essence_str(),
        Vec::new(),
    )
}
