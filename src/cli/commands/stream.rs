//! Audio streaming command.

use serde_json::Value;
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::resolver::{AudioStream, DefaultResolver};

/// Stream a track's audio to `output`, or stdout when absent.
///
/// Options from the config file apply first; `--opt` values override them.
pub fn cmd_stream(
    rt: &Runtime,
    config: &Config,
    url: &str,
    output: Option<&PathBuf>,
    options: &[(String, Value)],
) -> anyhow::Result<()> {
    let options = config
        .transcoder
        .options
        .clone()
        .merged_with(options.iter().cloned().collect());

    rt.block_on(async {
        let resolver = DefaultResolver::from_config(config);
        let stream = resolver.open_stream(url, options).await?;

        let written = match output {
            Some(path) => {
                let file = tokio::fs::File::create(path).await?;
                let written = copy_stream(stream, file).await?;
                eprintln!("Wrote {} bytes to {:?}", written, path);
                written
            }
            None => copy_stream(stream, tokio::io::stdout()).await?,
        };

        tracing::debug!("Stream finished after {} bytes", written);
        Ok(())
    })
}

/// Copy the whole stream into `sink` and flush it
async fn copy_stream<W>(mut stream: AudioStream, mut sink: W) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let written = tokio::io::copy(&mut stream, &mut sink).await?;
    sink.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StreamOptions;

    #[tokio::test]
    async fn test_copy_stream_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.raw");

        let stream = AudioStream::from_reader(std::io::Cursor::new(b"pcm bytes".to_vec()));
        let file = tokio::fs::File::create(&path).await.unwrap();
        let written = copy_stream(stream, file).await.unwrap();

        assert_eq!(written, 9);
        assert_eq!(std::fs::read(&path).unwrap(), b"pcm bytes");
    }

    #[test]
    fn test_cli_options_override_config() {
        let mut config = Config::default();
        config.transcoder.options.insert("fmt", "mp3");
        config.transcoder.options.insert("seek", 5);

        let merged = config
            .transcoder
            .options
            .clone()
            .merged_with(StreamOptions::new().with("seek", 30));

        assert_eq!(merged.get("fmt"), Some(&Value::from("mp3")));
        assert_eq!(merged.get("seek"), Some(&Value::from(30)));
    }
}
