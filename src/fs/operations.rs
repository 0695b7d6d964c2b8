use std::io::SeekFrom;

use tokio::io::{self, AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// Reads the last non-empty line of a file by walking backwards from its end in chunks the size
/// of `buffer`. Trailing newlines are not part of the result. The cursor is left at the end of the
/// file, ready for appending.
pub async fn read_last_line(
    file: &mut (impl AsyncSeek + AsyncRead + Unpin),
    buffer: &mut [u8],
) -> Result<Option<String>, io::Error> {
    let mut position = file.seek(SeekFrom::End(0)).await?;
    // Bytes read so far, kept in file order.
    let mut tail = Vec::<u8>::new();

    while position > 0 {
        let chunk = u64::min(position, buffer.len() as u64) as usize;
        position -= chunk as u64;
        file.seek(SeekFrom::Start(position)).await?;
        file.read_exact(&mut buffer[..chunk]).await?;

        let mut joined = buffer[..chunk].to_vec();
        joined.append(&mut tail);
        tail = joined;

        let Some(content_end) = tail.iter().rposition(|v| *v != b'\n') else {
            continue;
        };
        if let Some(line_start) = tail[..content_end].iter().rposition(|v| *v == b'\n') {
            tail.drain(..=line_start);
            break;
        }
    }

    file.seek(SeekFrom::End(0)).await?;

    let line = String::from_utf8_lossy(&tail).trim_end().to_string();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Whether the file is empty or its last byte is a newline. Leaves the cursor at the end.
pub async fn ends_with_newline(
    file: &mut (impl AsyncSeek + AsyncRead + Unpin),
) -> Result<bool, io::Error> {
    let length = file.seek(SeekFrom::End(0)).await?;
    if length == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let last = file.read_u8().await?;
    Ok(last == b'\n')
}
