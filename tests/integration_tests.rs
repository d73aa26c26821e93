use slon::{
    from_file, from_reader, from_str, to_file, to_string, to_string_with_options, to_writer,
    Document, Error, SlonOptions,
};
use std::io::{self, Cursor, Read, Write};

const USERS: &str = r#"
# users known to the server
{
    title="users" version="2"
    {
        name="user1" admin="true"   # first
        { permission="read" }
    }
    {
        name="user2"
        score="17.5"
    }
}
"#;

#[test]
fn test_parse_document() {
    let doc = from_str(USERS).unwrap();
    let root = doc.root().unwrap();

    assert_eq!(doc[root].keys().collect::<Vec<_>>(), vec!["title", "version"]);
    assert_eq!(doc[root].child_count(), 2);

    let user1 = doc.child(root, 0).unwrap();
    assert_eq!(doc[user1].get_bool("admin").unwrap(), Some(true));
    let permission = doc.child(user1, 0).unwrap();
    assert_eq!(doc[permission].get("permission"), Some("read"));
    assert_eq!(
        doc.ancestors(permission).collect::<Vec<_>>(),
        vec![user1, root]
    );

    let user2 = doc.child(root, 1).unwrap();
    assert_eq!(doc[user2].get_f64("score").unwrap(), Some(17.5));
    assert_eq!(doc.child(root, 2), None);
}

#[test]
fn test_find_child() {
    let doc = from_str(USERS).unwrap();
    let root = doc.root().unwrap();

    let found = doc.find_child(root, "name", "user2").unwrap();
    assert_eq!(doc[found].get("score"), Some("17.5"));
    // Only direct children are searched.
    assert_eq!(doc.find_child(root, "permission", "read"), None);
    // A child lacking the key never matches.
    assert_eq!(doc.find_child(root, "admin", "true"), doc.child(root, 0));
    assert_eq!(doc.find_child(root, "admin", "false"), None);
}

#[test]
fn test_build_and_serialize() {
    let mut doc = Document::with_root();
    let root = doc.root().unwrap();
    doc[root].set("a", "1");
    doc[root].set("b", "2");
    doc[root].set("a", "3");

    let child = doc.new_node();
    doc[child].set_i64("count", 10);
    doc.attach_child(root, child).unwrap();

    assert_eq!(
        to_string_with_options(&doc, SlonOptions::minimal()).unwrap(),
        r#"{a="3"b="2"{count="10"}}"#
    );
}

#[test]
fn test_round_trip_every_layout() {
    let doc = from_str(USERS).unwrap();
    for values_in_line in [true, false] {
        for save_minimal in [true, false] {
            let options = SlonOptions::new()
                .with_values_in_line(values_in_line)
                .with_save_minimal(save_minimal);
            let text = to_string_with_options(&doc, options).unwrap();
            assert_eq!(from_str(&text).unwrap(), doc, "{options:?}\n{text}");
        }
    }
}

#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join(format!("slon-test-{}.slon", std::process::id()));
    let doc = from_str(USERS).unwrap();

    to_file(&path, &doc, SlonOptions::new().with_values_in_line(false)).unwrap();
    let back = from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(back, doc);
}

#[test]
fn test_missing_file() {
    let result = from_file("/definitely/not/here.slon");
    assert!(matches!(result, Err(Error::Io(_))));
}

struct FailingReader {
    served: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        self.served = true;
        buf[..3].copy_from_slice(b"{ a");
        Ok(3)
    }
}

#[test]
fn test_stream_failure_is_io_error() {
    let err = from_reader(FailingReader { served: false }).unwrap_err();
    assert_eq!(err, Error::io("disk on fire"));
}

/// Accepts bytes until `fail_write`, or fails on flush with `fail_flush`.
struct FailingWriter {
    fail_write: bool,
    fail_flush: bool,
    written: Vec<u8>,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_write {
            return Err(io::Error::new(io::ErrorKind::Other, "device full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.fail_flush {
            return Err(io::Error::new(io::ErrorKind::Other, "flush refused"));
        }
        Ok(())
    }
}

#[test]
fn test_write_failure_is_io_error() {
    let doc = from_str(USERS).unwrap();
    let mut writer = FailingWriter {
        fail_write: true,
        fail_flush: false,
        written: Vec::new(),
    };
    assert_eq!(to_writer(&mut writer, &doc).unwrap_err(), Error::io("device full"));
    assert!(writer.written.is_empty());
}

#[test]
fn test_flush_failure_is_io_error() {
    let doc = from_str(USERS).unwrap();
    let mut writer = FailingWriter {
        fail_write: false,
        fail_flush: true,
        written: Vec::new(),
    };
    assert_eq!(to_writer(&mut writer, &doc).unwrap_err(), Error::io("flush refused"));
    assert_eq!(writer.written, to_string(&doc).unwrap().into_bytes());
}

#[test]
fn test_reader_with_multibyte_text() {
    let doc = from_reader(Cursor::new("{ name=\"Слон 🐘\" }".as_bytes().to_vec())).unwrap();
    assert_eq!(doc.root_node().unwrap().get("name"), Some("Слон 🐘"));

    // Keys are ASCII identifiers only.
    let err = from_reader(Cursor::new("{\n имя=\"x\" }".as_bytes().to_vec())).unwrap_err();
    assert_eq!(err, Error::syntax(2, "key or node expected"));
}

#[test]
fn test_json_interop() {
    let doc = from_str(USERS).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
    assert_eq!(to_string(&back).unwrap(), to_string(&doc).unwrap());
}
