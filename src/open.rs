//! File open flags and access mode.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Permission bits used when a call creates a file and no mode is given.
pub const DEFAULT_MODE: u32 = 0o644;

/// How a source or destination file is opened.
///
/// Mirrors [`std::fs::OpenOptions`]; the flag semantics are the host
/// platform's.
///
/// # Examples
///
/// ```
/// use tabrec::OpenFlags;
///
/// let flags = OpenFlags::new().write(true).create(true).truncate(true);
/// assert_eq!(flags, OpenFlags::create_truncate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenFlags {
	/// Open for reading.
	pub read: bool,
	/// Open for writing.
	pub write: bool,
	/// Append to the end of the file.
	pub append: bool,
	/// Create the file if it does not exist.
	pub create: bool,
	/// Truncate an existing file.
	pub truncate: bool,
	/// Create the file, failing if it exists.
	pub create_new: bool,
}

impl OpenFlags {
	/// All flags cleared.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read-only access to an existing file.
	pub fn read_only() -> Self {
		Self::new().read(true)
	}

	/// Read and write access to an existing file.
	pub fn read_write() -> Self {
		Self::new().read(true).write(true)
	}

	/// Write access, creating the file or truncating an existing one.
	pub fn create_truncate() -> Self {
		Self::new().write(true).create(true).truncate(true)
	}

	/// Sets the read flag.
	pub fn read(mut self, read: bool) -> Self {
		self.read = read;
		self
	}

	/// Sets the write flag.
	pub fn write(mut self, write: bool) -> Self {
		self.write = write;
		self
	}

	/// Sets the append flag.
	pub fn append(mut self, append: bool) -> Self {
		self.append = append;
		self
	}

	/// Sets the create flag.
	pub fn create(mut self, create: bool) -> Self {
		self.create = create;
		self
	}

	/// Sets the truncate flag.
	pub fn truncate(mut self, truncate: bool) -> Self {
		self.truncate = truncate;
		self
	}

	/// Sets the create-new flag.
	pub fn create_new(mut self, create_new: bool) -> Self {
		self.create_new = create_new;
		self
	}

	/// Opens `path` with these flags. `mode` holds the permission bits for a
	/// newly created file; it is ignored on non-Unix platforms.
	pub fn open(&self, path: impl AsRef<Path>, mode: u32) -> io::Result<File> {
		let mut options = OpenOptions::new();
		options
			.read(self.read)
			.write(self.write)
			.append(self.append)
			.create(self.create)
			.truncate(self.truncate)
			.create_new(self.create_new);

		#[cfg(unix)]
		{
			use std::os::unix::fs::OpenOptionsExt;
			options.mode(mode);
		}
		#[cfg(not(unix))]
		let _ = mode;

		options.open(path)
	}
}
