//! Reference resolution - follows `$ref` chains to concrete schema nodes.
//!
//! The resolver keeps a stack of in-flight pointers and a cache of completed
//! results. Re-entering a pointer that is still on the stack is a reference
//! cycle and yields [`Resolution::Cycle`] instead of an error.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};
use url::Url;

use crate::error::{BuildError, FetchFailure};
use crate::loader::{default_fetcher, Fetcher, FileLoader, FsLoader, RemoteCache};
use crate::node::RawNode;
use crate::pointer::{CanonicalPointer, DocumentUri};
use crate::registry::DocumentRegistry;
use crate::types::{BuildOptions, ANNOTATION_KEYWORDS};

/// A pointer followed through its `$ref` chain to a non-reference node.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    /// Where the chain ended.
    pub pointer: CanonicalPointer,
    pub node: RawNode,
    /// Every pointer traversed, starting with the requested one.
    pub chain: Vec<CanonicalPointer>,
    /// Constraint keywords written next to the first `$ref` of the chain.
    pub siblings: Map<String, Value>,
}

impl ResolvedNode {
    /// True when the requested pointer was itself a reference.
    pub fn is_reference(&self) -> bool {
        self.chain.len() > 1
    }

    /// The pointer the first `$ref` of the chain points at.
    pub fn first_target(&self) -> Option<&CanonicalPointer> {
        self.chain.get(1)
    }
}

/// Outcome of resolving one pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Node(ResolvedNode),
    /// The chain re-entered `target` while it was still being resolved.
    Cycle {
        target: CanonicalPointer,
        chain: Vec<CanonicalPointer>,
    },
}

/// Resolves canonical pointers against a session's documents.
pub struct Resolver {
    registry: DocumentRegistry,
    loader: Arc<dyn FileLoader>,
    fetcher: Arc<dyn Fetcher>,
    remote: Arc<RemoteCache>,
    options: BuildOptions,
    stack: Vec<CanonicalPointer>,
    cache: HashMap<CanonicalPointer, ResolvedNode>,
}

impl Resolver {
    /// Create a resolver over `registry` with the filesystem loader, the
    /// default fetcher and a private remote cache.
    pub fn new(registry: DocumentRegistry, options: BuildOptions) -> Self {
        Self {
            registry,
            loader: Arc::new(FsLoader),
            fetcher: default_fetcher(),
            remote: Arc::new(RemoteCache::new()),
            options,
            stack: Vec::new(),
            cache: HashMap::new(),
        }
    }

    pub fn with_file_loader(mut self, loader: Arc<dyn FileLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Use a remote cache shared with other sessions.
    pub fn with_remote_cache(mut self, remote: Arc<RemoteCache>) -> Self {
        self.remote = remote;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn registry(&self) -> &DocumentRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> DocumentRegistry {
        self.registry
    }

    /// Resolve `pointer`, following `$ref` until a concrete node is reached.
    ///
    /// Results are cached: resolving the same pointer again returns an equal
    /// value without loading anything.
    ///
    /// # Errors
    ///
    /// - `UnresolvableReference` if a pointer has no target
    /// - `FileNotFound` if a referenced file doesn't exist
    /// - `RemoteFetch` if a remote document can't be fetched (never cached)
    /// - `MalformedSchema` if a target is neither an object nor a boolean
    pub fn resolve(&mut self, pointer: &CanonicalPointer) -> Result<Resolution, BuildError> {
        if let Some(hit) = self.cache.get(pointer) {
            trace!(%pointer, "resolution cache hit");
            return Ok(Resolution::Node(hit.clone()));
        }

        if self.stack.contains(pointer) {
            debug!(%pointer, "reference cycle");
            return Ok(Resolution::Cycle {
                target: pointer.clone(),
                chain: self.stack.clone(),
            });
        }

        self.stack.push(pointer.clone());
        let outcome = self.follow(pointer);
        self.stack.pop();

        let resolution = outcome?;
        if let Resolution::Node(node) = &resolution {
            self.cache.insert(pointer.clone(), node.clone());
        }
        Ok(resolution)
    }

    /// Parse a `$ref` value written at `base` and resolve it.
    pub fn resolve_reference(
        &mut self,
        reference: &str,
        base: &CanonicalPointer,
    ) -> Result<Resolution, BuildError> {
        let target = CanonicalPointer::parse_reference(reference, base, &self.options.base_dir)?;
        self.resolve(&target)
            .map_err(|err| with_reference(err, &target, reference))
    }

    /// Read the node stored at `pointer` without following references.
    pub fn raw(&mut self, pointer: &CanonicalPointer) -> Result<RawNode, BuildError> {
        let document = self.document(pointer.document())?;
        let value = document
            .pointer(pointer.path())
            .ok_or_else(|| BuildError::UnresolvableReference {
                pointer: pointer.to_string(),
                reference: format!("#{}", pointer.path()),
            })?;
        RawNode::from_value(value, pointer)
    }

    fn follow(&mut self, pointer: &CanonicalPointer) -> Result<Resolution, BuildError> {
        let node = self.raw(pointer)?;
        let Some(reference) = node.reference().map(str::to_owned) else {
            return Ok(Resolution::Node(ResolvedNode {
                pointer: pointer.clone(),
                node,
                chain: vec![pointer.clone()],
                siblings: Map::new(),
            }));
        };

        let siblings = sibling_keywords(&node);
        match self.resolve_reference(&reference, pointer)? {
            Resolution::Node(mut resolved) => {
                resolved.chain.insert(0, pointer.clone());
                resolved.siblings = siblings;
                Ok(Resolution::Node(resolved))
            }
            cycle => Ok(cycle),
        }
    }

    fn document(&mut self, uri: &DocumentUri) -> Result<&Value, BuildError> {
        if !self.registry.contains(uri) {
            let document = match uri {
                DocumentUri::Memory(name) => {
                    return Err(BuildError::UnresolvableReference {
                        pointer: CanonicalPointer::root(uri.clone()).to_string(),
                        reference: name.clone(),
                    })
                }
                DocumentUri::File(path) => {
                    debug!(path = %path.display(), "loading schema file");
                    self.loader.load(path)?
                }
                DocumentUri::Remote(url) => self.fetch(url)?,
            };
            self.registry
                .register(uri.clone(), document)
                .map_err(|e| BuildError::malformed(uri, e.to_string()))?;
        }

        self.registry
            .lookup(uri)
            .map_err(|e| BuildError::UnresolvableReference {
                pointer: CanonicalPointer::root(uri.clone()).to_string(),
                reference: e.to_string(),
            })
    }

    fn fetch(&self, url: &Url) -> Result<Value, BuildError> {
        if !self.options.allow_remote {
            return Err(BuildError::RemoteFetch {
                url: url.to_string(),
                reason: FetchFailure::Disabled,
            });
        }
        self.remote
            .get_or_fetch(url, self.fetcher.as_ref(), self.options.fetch_timeout)
            .map_err(|reason| BuildError::RemoteFetch {
                url: url.to_string(),
                reason,
            })
    }
}

/// Keywords written next to `$ref` that constrain the node.
fn sibling_keywords(node: &RawNode) -> Map<String, Value> {
    node.as_object()
        .map(|map| {
            map.iter()
                .filter(|(key, _)| {
                    key.as_str() != "$ref" && !ANNOTATION_KEYWORDS.contains(&key.as_str())
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Attach the written `$ref` text to an unresolvable-target error.
fn with_reference(err: BuildError, target: &CanonicalPointer, reference: &str) -> BuildError {
    match err {
        BuildError::UnresolvableReference { pointer, .. } if pointer == target.to_string() => {
            BuildError::UnresolvableReference {
                pointer,
                reference: reference.to_string(),
            }
        }
        other => other,
    }
}
