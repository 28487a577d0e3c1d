use crate::classify::{ClassifiedFile, FileSettings, PluginData};

/// Files sorted into the sections of the merged output, as indices into the file slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Buckets {
    /// Files declaring the plugin class
    pub plugin: Vec<usize>,
    /// Supporting files written into the plugin class
    pub data: Vec<usize>,
    /// Framework files, each written as its own partial class
    pub framework: Vec<usize>,
    /// Extension fragments as (file, type) indices
    pub extensions: Vec<(usize, usize)>,
}

impl Buckets {
    /// Bucket `files`, flagging the fragment that declares the plugin class.
    pub fn sort(files: &mut [ClassifiedFile], plugin: &PluginData) -> Self {
        let mut buckets = Self::default();
        for (file_index, file) in files.iter_mut().enumerate() {
            let mut declares_plugin = false;
            for (type_index, ty) in file.types.iter_mut().enumerate() {
                if ty.is_extension() {
                    buckets.extensions.push((file_index, type_index));
                    continue;
                }
                if ty.namespace == plugin.namespace && ty.name == plugin.class_name {
                    ty.add_settings(FileSettings::PLUGIN);
                    declares_plugin = true;
                }
            }

            if file.is_framework() {
                buckets.framework.push(file_index);
            } else if declares_plugin {
                buckets.plugin.push(file_index);
            } else {
                buckets.data.push(file_index);
            }
        }
        buckets
    }

    /// Plugin and data files by `order`, ties in slice order.
    pub fn body(&self, files: &[ClassifiedFile]) -> Vec<usize> {
        let mut body: Vec<usize> = self.plugin.iter().chain(&self.data).copied().collect();
        body.sort_by_key(|&i| (files[i].order, i));
        body
    }

    /// Plugin files by `order`, ties in slice order.
    pub fn plugin_files(&self, files: &[ClassifiedFile]) -> Vec<usize> {
        let mut plugin = self.plugin.clone();
        plugin.sort_by_key(|&i| (files[i].order, i));
        plugin
    }

    pub fn is_data(&self, file_index: usize) -> bool {
        self.data.contains(&file_index)
    }
}
