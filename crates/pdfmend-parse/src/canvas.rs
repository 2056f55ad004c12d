//! Writing content fragments to a page.
//!
//! Every fragment becomes its own uncompressed content stream, inserted at
//! the front or the back of the page's `/Contents`. Existing streams are
//! never rewritten.

use lopdf::content::{Content, Operation};
use lopdf::{Object, ObjectId, Stream, StringFormat};
use pdfmend_core::{ContentOp, PageCanvas, PageSize};

use crate::error::BackendError;
use crate::lopdf_backend::{dict_mut, get_page_content_bytes};
use crate::tokenizer::starts_with_operator;

/// A page of a [`LopdfDocument`](crate::LopdfDocument) open for writing.
pub struct LopdfCanvas<'a> {
    doc: &'a mut lopdf::Document,
    page_id: ObjectId,
    size: PageSize,
}

impl<'a> LopdfCanvas<'a> {
    pub(crate) fn new(doc: &'a mut lopdf::Document, page_id: ObjectId, size: PageSize) -> Self {
        Self { doc, page_id, size }
    }

    pub fn page_id(&self) -> ObjectId {
        self.page_id
    }

    fn insert_stream(&mut self, ops: &[ContentOp], front: bool) -> Result<(), BackendError> {
        let bytes = encode_fragment(ops)?;
        let stream_id = self
            .doc
            .add_object(Stream::new(lopdf::Dictionary::new(), bytes));
        add_content_stream(self.doc, self.page_id, stream_id, front)
    }
}

impl PageCanvas for LopdfCanvas<'_> {
    type Error = BackendError;

    fn page_size(&self) -> PageSize {
        self.size
    }

    fn starts_with_save_state(&self) -> Result<bool, BackendError> {
        let page = self
            .doc
            .get_object(self.page_id)
            .and_then(Object::as_dict)
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
        let content = get_page_content_bytes(&*self.doc, page)?;
        Ok(starts_with_operator(&content, "q"))
    }

    fn prepend(&mut self, ops: &[ContentOp]) -> Result<(), BackendError> {
        self.insert_stream(ops, true)
    }

    fn append(&mut self, ops: &[ContentOp]) -> Result<(), BackendError> {
        self.insert_stream(ops, false)
    }
}

/// Serialize operations as content stream bytes.
///
/// # Errors
///
/// Returns [`BackendError::Content`] if lopdf fails to encode them.
pub fn encode_fragment(ops: &[ContentOp]) -> Result<Vec<u8>, BackendError> {
    let content = Content {
        operations: ops.iter().map(to_operation).collect::<Vec<_>>(),
    };
    content
        .encode()
        .map_err(|e| BackendError::Content(format!("failed to encode content: {e}")))
}

fn to_operation(op: &ContentOp) -> Operation {
    let operands = match op {
        ContentOp::SetFont { resource, size } => vec![
            Object::Name(resource.as_bytes().to_vec()),
            Object::Real(*size as f32),
        ],
        ContentOp::MoveText { dx, dy } => vec![Object::Real(*dx as f32), Object::Real(*dy as f32)],
        ContentOp::ShowText(bytes) => vec![Object::String(bytes.clone(), string_format(bytes))],
        ContentOp::SaveState
        | ContentOp::RestoreState
        | ContentOp::BeginText
        | ContentOp::EndText => Vec::new(),
    };
    Operation::new(op.operator(), operands)
}

/// Printable ASCII stays literal; anything else is written as hex.
fn string_format(bytes: &[u8]) -> StringFormat {
    if bytes.iter().all(|b| (0x20..0x7F).contains(b)) {
        StringFormat::Literal
    } else {
        StringFormat::Hexadecimal
    }
}

/// Put `stream_id` first or last in the page's `/Contents`.
///
/// A single stream is turned into an array and an indirect array is copied
/// into a direct one, leaving the shared object alone. A page without content
/// gets the stream as its only content.
fn add_content_stream(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
    stream_id: ObjectId,
    front: bool,
) -> Result<(), BackendError> {
    let existing = dict_mut(doc, page_id)?.get(b"Contents").ok().cloned();
    let new_ref = Object::Reference(stream_id);
    let place = |mut items: Vec<Object>| {
        if front {
            items.insert(0, new_ref.clone());
        } else {
            items.push(new_ref.clone());
        }
        items
    };

    let contents = match existing {
        None => new_ref.clone(),
        Some(Object::Array(items)) => Object::Array(place(items)),
        Some(Object::Reference(id)) => match doc.get_object(id) {
            // The array may be shared with other pages, so this page gets
            // its own copy.
            Ok(Object::Array(items)) => Object::Array(place(items.clone())),
            Ok(_) => Object::Array(place(vec![Object::Reference(id)])),
            Err(e) => {
                return Err(BackendError::Content(format!(
                    "failed to resolve /Contents: {e}"
                )));
            }
        },
        Some(other) => {
            return Err(BackendError::Content(format!(
                "/Contents is not a stream or array: {other:?}"
            )));
        }
    };
    dict_mut(doc, page_id)?.set("Contents", contents);
    Ok(())
}
